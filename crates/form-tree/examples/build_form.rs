use anyhow::Result;
use form_tree::query::stats;
use form_tree::{
    count_elements, ensure_valid, outline, DropTarget, ElementPatch, Palette,
    TimestampIdGenerator, TreeEditor,
};

fn main() -> Result<()> {
    env_logger::init();

    let palette = Palette::builtin();
    let editor = TreeEditor::new();
    let mut ids = TimestampIdGenerator::new();

    // Drop a name field and a section onto the empty canvas
    let name = palette.create("text", &mut ids)?;
    let section = palette.create("section", &mut ids)?;
    let section_id = section.id.clone();

    let tree = editor.insert(&[], &DropTarget::root(), name);
    let tree = editor.insert(&tree, &DropTarget::root(), section);

    // Drop an email field into the section
    let email = palette.create("email", &mut ids)?;
    let tree = editor.insert(&tree, &DropTarget::container(section_id.clone()), email);

    // Rename the section and make it two columns wide
    let patch = ElementPatch::new().label("Contact").property("columns", 2);
    let tree = editor.update_by_id(&tree, &section_id, &patch);

    println!("Form:");
    println!("{}", outline(&tree));
    println!("  Elements: {}", count_elements(&tree));

    // Duplicate the section; every element of the copy gets a new id
    let tree = editor.duplicate_by_id(&tree, &section_id, &mut ids);
    ensure_valid(&tree)?;

    println!("\nAfter duplicating the section:");
    println!("{}", outline(&tree));

    let summary = stats(&tree);
    println!("\nTree statistics:");
    println!("  Elements: {}", summary.elements);
    println!("  Containers: {}", summary.containers);
    println!("  Leaves: {}", summary.leaves);
    println!("  Max depth: {}", summary.max_depth);

    println!("\nJSON:");
    println!("{}", serde_json::to_string_pretty(&tree)?);

    Ok(())
}
