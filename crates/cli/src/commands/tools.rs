//! `mnemo tools` — list the registered tools.

pub fn run() -> anyhow::Result<()> {
    let registry = mnemo_tools::default_registry();

    println!();
    println!("Registered tools ({}):", registry.len());
    println!();
    for line in registry.render_descriptions().lines() {
        println!("  {line}");
    }
    println!();
    println!("The model invokes a tool by replying with 'ToolName(arg)' or 'ToolName()'.");
    println!();

    Ok(())
}
