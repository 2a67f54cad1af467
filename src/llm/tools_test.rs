use super::*;

#[test]
fn authoring_tools_names_are_correct() {
    let tools = authoring_tools();
    assert_eq!(tools.len(), 3);
    let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
    assert!(names.contains(&"search_knowledge"));
    assert!(names.contains(&"web_search"));
    assert!(names.contains(&"generate_slide"));
}

#[test]
fn authoring_tools_schemas_are_objects() {
    let tools = authoring_tools();
    for tool in &tools {
        assert_eq!(
            tool.input_schema.get("type").and_then(|v| v.as_str()),
            Some("object"),
            "tool {} schema should be type=object",
            tool.name
        );
    }
}

#[test]
fn generate_slide_layout_enum_excludes_precanned() {
    let tools = authoring_tools();
    let slide_tool = tools.iter().find(|t| t.name == "generate_slide").unwrap();
    let layouts: Vec<&str> = slide_tool.input_schema["properties"]["layout"]["enum"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(layouts.len(), 10);
    assert!(layouts.contains(&"title"));
    assert!(layouts.contains(&"chart"));
    assert!(!layouts.contains(&"demo"));
    assert!(!layouts.contains(&"youtube"));
}

#[test]
fn generate_slide_requires_core_fields() {
    let tools = authoring_tools();
    let slide_tool = tools.iter().find(|t| t.name == "generate_slide").unwrap();
    let required: Vec<&str> = slide_tool.input_schema["required"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(required, vec!["layout", "title", "keyPoints"]);
}

#[test]
fn suggest_tool_pins_three_sets() {
    let tool = suggest_topic_sets_tool();
    assert_eq!(tool.name, "suggest_topic_sets");
    let sets = &tool.input_schema["properties"]["sets"];
    assert_eq!(sets["minItems"], 3);
    assert_eq!(sets["maxItems"], 3);
}
