//! Doctor command - report required and optional commands

use anyhow::Result;

use crate::ops::prereq;

pub fn doctor() -> Result<()> {
    let mut missing_required = None;

    for (name, required) in [("git", true), ("code", false)] {
        match prereq::optional_command(name) {
            Some(path) => println!("ok       {name} ({})", path.display()),
            None if required => {
                println!("missing  {name} (required)");
                missing_required = Some(name);
            }
            None => println!("missing  {name} (optional)"),
        }
    }

    match missing_required {
        Some(name) => Err(prereq::MissingRequiredCommand(name.to_string()).into()),
        None => Ok(()),
    }
}
