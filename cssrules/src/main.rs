use clap::Parser;
use cssrules_lib::style::rule_parser::split_rules;
use cssrules_lib::{RuleError, RuleStore};
use log::{info, warn};
use std::fs;

#[derive(Parser)]
#[command(name = "cssrules")]
#[command(about = "Apply CSS rules by selector and query the resulting stylesheet")]
struct Args {
    /// Input CSS file. Every top-level style rule is applied with `set_rule`.
    input: String,

    /// Selector to look up after the input is applied (repeatable).
    #[arg(short, long = "get", value_name = "SELECTOR")]
    get: Vec<String>,

    /// Print the resulting stylesheet.
    #[arg(short, long)]
    print: bool,
}

fn run(args: &Args, css_content: &str) -> Result<(), RuleError> {
    let mut store = RuleStore::in_memory();
    for source in split_rules(css_content) {
        if source.selector.starts_with('@') {
            warn!("skipping at-rule `{}`", source.selector);
            continue;
        }
        store.set_rule(source.selector, source.body.trim())?;
    }
    info!(
        "stylesheet has {} rules for {} selectors",
        store.len(),
        store.records().count()
    );

    for selector in &args.get {
        let mut declarations: Vec<_> = store.get_rule(selector).into_iter().collect();
        declarations.sort();
        print!("{} {{", selector);
        for (property, value) in declarations {
            print!(" {}: {};", property, value);
        }
        println!(" }}");
    }

    if args.print {
        print!("{}", store.sheet());
    }
    Ok(())
}

fn main() {
    env_logger::init();

    // parse the args given in terminal
    let args: Args = Args::parse();

    match fs::read_to_string(&args.input) {
        Ok(css_content) => {
            info!("read {} bytes from {}", css_content.len(), args.input);
            if let Err(e) = run(&args, &css_content) {
                eprintln!("Error applying rules: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error reading CSS file: {}", e);
            std::process::exit(1);
        }
    }
}
