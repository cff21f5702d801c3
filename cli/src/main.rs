//! dsn CLI: driving adapter for dsn templates.
//!
//! Subcommands:
//! - `parse <config> [--template <name>] [--exact] [--trace] <input>...`: parse inputs
//! - `check <config>`: validate every template in a config compiles
//! - `tokens <template>`: print the token stream of a template
//! - `uri <input>...`: parse inputs with the built-in URI template
//! - `serve [dir]`: serve a directory of config files over HTTP on a free port

use std::process;

use dsn::{Template, TemplateConfig, TemplateSetConfig};
use serde::Deserialize;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "parse" => cmd_parse(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "tokens" => cmd_tokens(&args[2..]),
        "uri" => cmd_uri(&args[2..]),
        "serve" => cmd_serve(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_parse(args: &[String]) -> Result<(), String> {
    let opts = parse_args(args)?;
    let templates = load_templates(&opts.config)?;
    let template = select_template(&templates, opts.template.as_deref())?;

    for input in &opts.inputs {
        println!("{}", render(template, input, opts.exact)?);
        if opts.trace {
            print!("{}", template.parse_with_trace(input).root);
        }
    }

    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    let [config_path] = args else {
        return Err("check requires a config file path".into());
    };

    let templates = load_templates(config_path)?;
    for template in &templates {
        println!("  {template}");
    }
    println!("{} template(s) valid", templates.len());
    Ok(())
}

fn cmd_tokens(args: &[String]) -> Result<(), String> {
    let [template] = args else {
        return Err("tokens requires a template".into());
    };

    for token in dsn::tokenize(template) {
        println!("{:>4}  {token}", token.offset);
    }
    Ok(())
}

fn cmd_uri(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("uri requires at least one input".into());
    }

    let uri = dsn::presets::uri().map_err(|e| format!("uri preset invalid: {e}"))?;
    for input in args {
        println!("{}", render(&uri, input, false)?);
    }
    Ok(())
}

fn cmd_serve(args: &[String]) -> Result<(), String> {
    let dir = match args {
        [] => ".",
        [dir] => dir.as_str(),
        _ => return Err("serve takes at most one directory".into()),
    };
    if !std::path::Path::new(dir).is_dir() {
        return Err(format!("\"{dir}\" is not a directory"));
    }

    let runtime =
        tokio::runtime::Runtime::new().map_err(|e| format!("failed to start runtime: {e}"))?;

    runtime.block_on(async {
        let listener = dsn_http::bind_free_port()
            .await
            .map_err(|e| format!("failed to bind: {e}"))?;
        let addr = listener
            .local_addr()
            .map_err(|e| format!("failed to read address: {e}"))?;
        println!("serving \"{dir}\" at http://{addr}/");

        let service = dsn_http::LogRequests::new(dsn_http::ServeDir::new(dir));
        dsn_http::serve(listener, service)
            .await
            .map_err(|e| format!("server error: {e}"))
    })
}

fn render(template: &Template, input: &str, exact: bool) -> Result<String, String> {
    let fields = if exact {
        template.parse_exact(input)
    } else {
        template.parse(input)
    };

    match fields {
        Some(fields) => serde_json::to_string(&fields).map_err(|e| format!("JSON error: {e}")),
        None => Ok("(no match)".to_owned()),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Config loading
// ═══════════════════════════════════════════════════════════════════════════════

/// A config file holds either a list of templates or a single one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConfigFile {
    Set(TemplateSetConfig),
    Single(TemplateConfig),
}

impl ConfigFile {
    fn build(&self) -> Result<Vec<Template>, String> {
        let built = match self {
            Self::Set(set) => set.build(),
            Self::Single(single) => single.build().map(|t| vec![t]),
        };
        built.map_err(|e| format!("config invalid: {e}"))
    }
}

fn load_templates(path: &str) -> Result<Vec<Template>, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;

    let is_json = std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    parse_config(&content, is_json)?.build()
}

fn parse_config(content: &str, is_json: bool) -> Result<ConfigFile, String> {
    if is_json {
        serde_json::from_str(content).map_err(|e| format!("JSON parse error: {e}"))
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(content).map_err(|e| format!("YAML parse error: {e}"))
    }
}

fn select_template<'a>(templates: &'a [Template], name: Option<&str>) -> Result<&'a Template, String> {
    match (name, templates) {
        (Some(name), _) => templates
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| format!("no template named \"{name}\"")),
        (None, [only]) => Ok(only),
        (None, []) => Err("config has no templates".into()),
        (None, _) => Err(format!(
            "config has {} templates, pick one with --template",
            templates.len()
        )),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Argument parsing
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default, PartialEq, Eq)]
struct ParseArgs {
    config: String,
    template: Option<String>,
    exact: bool,
    trace: bool,
    inputs: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<ParseArgs, String> {
    let Some((config, rest)) = args.split_first() else {
        return Err("parse requires a config file path".into());
    };

    let mut opts = ParseArgs {
        config: config.clone(),
        ..ParseArgs::default()
    };
    let mut i = 0;

    while i < rest.len() {
        match rest[i].as_str() {
            "--template" => {
                i += 1;
                let name = rest.get(i).ok_or("--template requires a name")?;
                opts.template = Some(name.clone());
            }
            "--exact" => opts.exact = true,
            "--trace" => opts.trace = true,
            flag if flag.starts_with("--") => {
                return Err(format!("unexpected argument \"{flag}\""));
            }
            input => opts.inputs.push(input.to_owned()),
        }
        i += 1;
    }

    if opts.inputs.is_empty() {
        return Err("parse requires at least one input".into());
    }

    Ok(opts)
}

fn print_usage() {
    eprintln!(
        "Usage: dsn <command> [options]

Commands:
  parse <config> [--template <name>] [--exact] [--trace] <input>...
                                   Parse inputs with a template from config
  check <config>                   Validate every template in config
  tokens <template>                Print the token stream of a template
  uri <input>...                   Parse inputs with the built-in URI template
  serve [dir]                      Serve dir (default .) over HTTP on a free port
  help                             Show this help

Config files are YAML, or JSON when the extension is .json."
    );
}
