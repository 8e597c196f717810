use form_tree::{
    count_elements, ensure_valid, outline, Element, ElementId, ElementPatch, TimestampIdGenerator,
    TreeEditor,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn stored_form() -> serde_json::Value {
    json!([
        {"id": "1", "type": "text", "label": "Name", "properties": {}, "placeholder": "Your name"},
        {
            "id": "2",
            "type": "section",
            "label": "Details",
            "properties": {"columns": 2, "rules": [{"when": "1", "equals": "x", "show": false}]},
            "children": [
                {"id": "3", "type": "email", "label": "Email", "properties": {"required": true}},
                {"id": "4", "type": "section", "label": "Empty", "properties": {}, "children": []}
            ]
        }
    ])
}

#[test]
fn test_stored_form_loads_and_validates() {
    let tree: Vec<Element> = serde_json::from_value(stored_form()).unwrap();
    ensure_valid(&tree).unwrap();

    assert_eq!(count_elements(&tree), 4);
    assert!(tree[0].is_leaf());
    assert!(tree[1].children()[1].is_container());
    assert_eq!(tree[0].fields.get("placeholder"), Some(&json!("Your name")));
    assert_eq!(tree[1].column_count(), 2);

    insta::assert_snapshot!(outline(&tree), @r"
    - Name (text) #1
    - Details (section) #2
      - Email (email) #3
      - Empty (section) #4
    ");
}

#[test]
fn test_untouched_form_serializes_identically() {
    let tree: Vec<Element> = serde_json::from_value(stored_form()).unwrap();
    let editor = TreeEditor::new();

    let next = editor.delete_by_id(&tree, &ElementId::from("missing"));
    assert_eq!(serde_json::to_value(&next).unwrap(), stored_form());
}

#[test]
fn test_duplicate_deep_clones_properties() {
    let tree: Vec<Element> = serde_json::from_value(stored_form()).unwrap();
    let editor = TreeEditor::new();
    let mut ids = TimestampIdGenerator::new();

    let next = editor.duplicate_by_id(&tree, &ElementId::from("2"), &mut ids);
    ensure_valid(&next).unwrap();
    assert_eq!(count_elements(&next), 7);

    // Editing the clone's rules leaves the original's alone
    let copy_id = next[2].id.clone();
    let patch = ElementPatch::new().property("rules", json!([]));
    let next = editor.update_by_id(&next, &copy_id, &patch);

    assert_eq!(next[1].properties.get("rules"), tree[1].properties.get("rules"));
    assert_eq!(next[2].properties.get("rules"), Some(&json!([])));
    assert_eq!(next[2].label, "Details Copy");
    assert_eq!(next[2].children()[0].label, "Email");
}

#[test]
fn test_duplicate_ids_rejected_on_load() {
    let tree: Vec<Element> = serde_json::from_value(json!([
        {"id": "a", "type": "text", "label": "A"},
        {"id": "a", "type": "text", "label": "B"}
    ]))
    .unwrap();

    let err = ensure_valid(&tree).unwrap_err();
    assert_eq!(err.to_string(), "duplicate element id a");
}

#[test]
fn test_reserved_keys_in_fields_are_not_serialized() {
    let clean = Element::leaf("1", "text", "Name").with_field("placeholder", "Your name");
    let mut element = clean.clone();
    element.fields.insert("id".into(), json!("other"));
    element.fields.insert("type".into(), json!("section"));
    element.fields.insert("children".into(), json!([]));

    let text = serde_json::to_string(&element).unwrap();
    let loaded: Element = serde_json::from_str(&text).unwrap();

    assert_eq!(loaded.id.as_str(), "1");
    assert_eq!(loaded.kind, "text");
    assert!(loaded.is_leaf());
    assert_eq!(loaded, clean);
}

#[test]
fn test_null_label_and_properties_load_as_empty() {
    let element: Element = serde_json::from_value(json!(
        {"id": "1", "type": "text", "label": null, "properties": null}
    ))
    .unwrap();

    assert_eq!(element.label, "");
    assert!(element.properties.is_empty());
    assert!(element.fields.is_empty());
}
