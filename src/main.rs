#![allow(nonstandard_style)]

use modecalc::*;

use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const STORE_SEPARATOR: &str = ":=";

fn prompt(controller: &Controller) -> std::io::Result<()> {
    print!("[{}]> ", controller.mode_label());
    std::io::stdout().flush()
}

fn show(output: &FormattedOutput) {
    if output.is_blank() {
        println!("?");
        return;
    }
    println!("{}", output.decimal);
    if !output.hex.is_empty() {
        println!("  hex  {}", output.hex);
        println!("  bits {}", output.bits);
    }
}

/// Handles one line as an enter press in the input field.
fn handle(controller: &mut Controller, line: &str) {
    if controller.on_enter_command(line).clears_input() {
        return;
    }

    if line.trim() == ":vars" {
        let store = controller.store();
        for name in store.names() {
            if let Some(variable) = store.resolve(&name) {
                println!("{} [{}] = {}", variable.name, variable.mode.label(), variable.expression);
            }
        }
        return;
    }

    if let Some((name, expression)) = line.split_once(STORE_SEPARATOR) {
        let expression = expression.trim();
        match controller.on_store_command(name, expression) {
            Ok(name) => show(&controller.on_input_changed(&name)),
            Err(e) => println!("Error, {e}"),
        }
        return;
    }

    match controller.evaluate(line) {
        Ok(Some(value)) => show(&format(value)),
        Ok(None) => {},
        Err(e) => println!("Error, {e}"),
    }
}

fn main() -> std::io::Result<()> {
    let settings = Settings::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&settings.log).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut controller = Controller::with_settings(&settings, Arc::new(VariableStore::new()));

    prompt(&controller)?;
    for line in std::io::stdin().lines() {
        let line = line?;

        if line.trim().is_empty() {
            break;
        }

        handle(&mut controller, &line);
        prompt(&controller)?;
    }
    Ok(())
}
