use veil_core::storage::Backend;
use veil_core::VeilError;

use crate::app::{open_backend, open_client};
use crate::cli::{Cli, GetArgs, InspectArgs, ListArgs, SetArgs};
use crate::helpers::read_value;
use crate::output::{print_raw, raw_json, slots_json, slots_table, value_json, SlotSummary};

pub fn handle_set(cli: &Cli, args: &SetArgs) -> anyhow::Result<()> {
    let value = read_value(args.value.clone(), args.no_input)?;
    let mut client = open_client(cli, args.no_input)?;
    client.write_text(&args.key, &value)?;

    if !cli.quiet {
        println!("Stored {}", args.key);
    }
    Ok(())
}

pub fn handle_get(cli: &Cli, args: &GetArgs) -> anyhow::Result<()> {
    let client = open_client(cli, args.no_input)?;
    let payload = client.read_required(&args.key)?;
    let kind = payload.kind();
    let value = payload.into_text()?;

    if args.json {
        let output = serde_json::to_string_pretty(&value_json(&args.key, kind, &value))?;
        println!("{}", output);
    } else {
        println!("{}", value);
    }
    Ok(())
}

pub fn handle_inspect(cli: &Cli, args: &InspectArgs) -> anyhow::Result<()> {
    let backend = open_backend(cli)?;
    let bytes = backend
        .get(&args.key)?
        .ok_or_else(|| VeilError::AbsentValue(args.key.clone()))?;

    if args.json {
        let output = serde_json::to_string_pretty(&raw_json(&args.key, &bytes, backend.header()))?;
        println!("{}", output);
    } else {
        print_raw(&args.key, &bytes, backend.header(), cli.quiet);
    }
    Ok(())
}

pub fn handle_list(cli: &Cli, args: &ListArgs) -> anyhow::Result<()> {
    let backend = open_backend(cli)?;
    let mut slots = Vec::new();
    for key in backend.keys()? {
        let stored_bytes = backend.get(&key)?.map(|bytes| bytes.len()).unwrap_or(0);
        slots.push(SlotSummary { key, stored_bytes });
    }

    if args.json {
        let output = serde_json::to_string_pretty(&slots_json(&slots))?;
        println!("{}", output);
        return Ok(());
    }

    if slots.is_empty() {
        if !cli.quiet {
            println!("No keys stored.");
        }
        return Ok(());
    }

    if cli.quiet {
        for slot in &slots {
            println!("{}", slot.key);
        }
    } else {
        println!("{}", slots_table(&slots));
    }
    Ok(())
}
