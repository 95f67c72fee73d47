//! `hostpack target` — Show the resolved bundle policy.

use hostpack_bundle::{host_fxr_name, host_policy_name};

use super::TargetArgs;

pub fn execute(args: TargetArgs, json: bool) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let info = args.resolve(&cwd)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", info);
    println!("  Bundle version:     {}", info.bundle_major_version());
    println!("  Default options:    {}", info.default_options());
    println!("  Assembly alignment: {}", info.assembly_alignment());

    let excluded: Vec<&str> = [host_fxr_name(info.os()), host_policy_name(info.os())]
        .into_iter()
        .filter(|name| info.should_exclude(name))
        .collect();
    if excluded.is_empty() {
        println!("  Excluded:           (none)");
    } else {
        println!("  Excluded:           {}", excluded.join(", "));
    }

    Ok(())
}
