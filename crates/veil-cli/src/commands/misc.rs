use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::Cli;
use crate::helpers::generate_key_string;

pub fn handle_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "veil", &mut std::io::stdout());
    Ok(())
}

pub fn handle_keygen(cli: &Cli) -> anyhow::Result<()> {
    let key = generate_key_string()?;
    println!("{}", key);
    if !cli.quiet {
        eprintln!("Store it somewhere safe and export it as VEIL_KEY.");
    }
    Ok(())
}
