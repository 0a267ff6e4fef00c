use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, Config, EntryConfig, ProjectConfig};
use crate::model::{CharacteristicKind, Complexity, FunctionType, MAX_DEGREE};
use crate::scoring::weight_for;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Print text with a typewriter effect, one character at a time.
fn typewriter(text: &str) {
    use std::thread;
    use std::time::Duration;
    for c in text.chars() {
        print!("{}", c);
        std::io::stdout().flush().ok();
        thread::sleep(Duration::from_millis(18));
    }
    println!();
}

/// Parse a rating typed by the user. Only whole numbers 0..=5 are accepted.
fn parse_degree(input: &str) -> Result<i64, String> {
    match input.trim().parse::<i64>() {
        Ok(v) if (0..=MAX_DEGREE as i64).contains(&v) => Ok(v),
        Ok(v) => Err(format!("{} is outside 0-{}", v, MAX_DEGREE)),
        Err(_) => Err(format!("'{}' is not a whole number", input.trim())),
    }
}

/// Ask for the entries of one project until the user stops.
fn prompt_entries(project_id: &str) -> Result<Vec<EntryConfig>> {
    let mut entries = Vec::new();
    let mut add_entry = prompt_yes_no("  Add a function to this project?", true)?;
    while add_entry {
        let function_type = loop {
            let t = prompt_with_default("    Type (ILF, EIF, EI, EO, EQ)", "ILF")?;
            match t.parse::<FunctionType>() {
                Ok(ft) => break ft,
                Err(e) => println!("    Invalid: {}. Try again.", e),
            }
        };
        let name = loop {
            let n = prompt("    Function name: ")?;
            if !n.is_empty() {
                break n;
            }
            println!("    Function name is required.");
        };
        let complexity = loop {
            let c = prompt_with_default("    Complexity (low, medium, high)", "low")?;
            match c.parse::<Complexity>() {
                Ok(cx) => break cx,
                Err(e) => println!("    Invalid: {}. Try again.", e),
            }
        };

        println!(
            "    {} {} ({}) = {} points",
            function_type.code(),
            name,
            complexity,
            weight_for(function_type, complexity)
        );
        entries.push(EntryConfig {
            project: project_id.to_string(),
            function_type: function_type.code().to_string(),
            name,
            complexity: complexity.as_str().to_string(),
        });

        add_entry = prompt_yes_no("  Add another function?", false)?;
    }
    Ok(entries)
}

/// Run the interactive init wizard to create a workspace file.
///
/// If `default_path` is Some, uses that as the suggested file path.
/// Otherwise, suggests the default workspace path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    typewriter("Function Point Workspace Wizard");
    println!("===============================");
    println!();

    // 1. Projects (at least one required)
    typewriter("A workspace groups the systems you are measuring. Each project gets its own unadjusted and adjusted totals.");
    println!();

    let mut projects: Vec<ProjectConfig> = Vec::new();
    let mut entries: Vec<EntryConfig> = Vec::new();
    loop {
        let id = (projects.len() + 1).to_string();
        let name = loop {
            let n = prompt(&format!("Project {} name: ", id))?;
            if !n.is_empty() {
                break n;
            }
            println!("  Project name is required.");
        };

        entries.extend(prompt_entries(&id)?);
        projects.push(ProjectConfig { id, name });

        if !prompt_yes_no("Add another project?", false)? {
            break;
        }
        println!();
    }

    // 2. General system characteristics
    println!();
    typewriter("Fourteen general system characteristics scale every project's total through the value adjustment factor.");
    typewriter("Each is rated 0 (no influence) to 5 (strong influence). The seeded ratings give a factor of 0.90.");
    let mut characteristics: BTreeMap<String, i64> = BTreeMap::new();
    if prompt_yes_no("Rate the characteristics now? (n keeps the seeded ratings)", false)? {
        for kind in CharacteristicKind::ALL {
            let default = kind.default_degree().to_string();
            let degree = loop {
                let input = prompt_with_default(&format!("  {}", kind.label()), &default)?;
                match parse_degree(&input) {
                    Ok(v) => break v,
                    Err(e) => println!("  Invalid: {}. Try again.", e),
                }
            };
            if degree != kind.default_degree() as i64 {
                characteristics.insert(kind.key().to_string(), degree);
            }
        }
    }

    // 3. Workspace path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the workspace be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Workspace already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 4. Validate and write
    let config = Config {
        projects,
        entries,
        characteristics,
        export: None,
        theme: None,
    };
    if let Err(errors) = crate::scoring::validate_workspace(&config) {
        anyhow::bail!("Workspace is invalid:\n  {}", errors.join("\n  "));
    }

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize workspace: {}", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write workspace to {}", config_path.display()))?;

    println!();
    println!("Workspace written to {}", config_path.display());
    println!("Run `fpa-calc summary` or `fpa-calc tui` to get started.");

    Ok(())
}
