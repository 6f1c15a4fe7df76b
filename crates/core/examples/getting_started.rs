use orgdir::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug to see detailed logs)
    env_logger::init();

    println!("=== Organization Directory - Getting Started ===\n");

    let directory = DirectoryBuilder::new().demo_data(true).build()?;
    let stats = directory.stats()?;
    println!(
        "✓ Seeded {} buildings, {} activities, {} organizations\n",
        stats.buildings, stats.activities, stats.organizations
    );

    // === ACTIVITY TREE ===
    println!("1. Activity Tree");
    println!("----------------");
    fn print_node(node: &TreeNode, depth: usize) {
        println!("   {}{} (id {})", "  ".repeat(depth), node.name, node.id);
        for child in &node.children {
            print_node(child, depth + 1);
        }
    }
    for root in directory.activity_tree()? {
        print_node(&root, 0);
    }
    println!();

    // === ACTIVITY QUERIES ===
    println!("2. Single Activity vs Subtree");
    println!("-----------------------------");
    let single = directory.organizations_by_activity(1)?;
    let subtree = directory.organizations_by_activity_tree(1)?;
    println!("   Tagged exactly with \"Еда\": {}", single.len());
    println!("   Anywhere under \"Еда\":");
    for record in &subtree {
        println!("     - {}", record.name());
    }
    println!();

    // === GEO QUERIES ===
    println!("3. Geo Queries");
    println!("--------------");
    let near = RadiusQuery::new(55.7558, 37.6173, 1.0);
    for record in directory.organizations_in_radius(&near)? {
        let km = distance_km(near.latitude, near.longitude, record.building.latitude, record.building.longitude);
        println!("   {:<28} {:.2} km", record.name(), km);
    }

    let spb = RectangleQuery::new(59.8, 60.1, 30.1, 30.5);
    let found = directory.organizations_in_rectangle(&spb)?;
    println!("   In the St. Petersburg box: {}\n", found.len());

    // === NAME SEARCH ===
    println!("4. Name Search");
    println!("--------------");
    for record in directory.search_by_name("молочн")? {
        println!("   \"молочн\" -> {}", record.name());
    }

    Ok(())
}
