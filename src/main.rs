mod collector_core;
mod collectors;
mod gcp;
mod mock;
mod report;
mod scan;

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("\n[!] {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    print_disclaimer();

    let agreement = prompt(">> Do you agree to these terms? (y/n): ")?;
    if agreement.to_lowercase() != "y" {
        println!("\n[!] You did not agree to the terms. Exiting.");
        return Ok(());
    }

    println!("\n{}", "=".repeat(80));
    println!("   Google Cloud Logging: Volume (30d) + Sink Logging Configs");
    println!("{}\n", "=".repeat(80));

    let org_id = prompt(">> Please enter your Organization ID (e.g. 123456789): ")?;
    if org_id.is_empty() {
        bail!("You must enter an Organization ID.");
    }

    println!("{}", "-".repeat(80));

    let collab = if std::env::var("MOCK_MODE").is_ok() {
        mock::demo_collaborators()
    } else {
        let api = gcp::GcpApi::from_env().await?;
        collectors::build_collaborators(&api)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    scan::scan_org(&org_id, &collab, &mut out).await?;

    Ok(())
}

fn print_disclaimer() {
    println!("\n{}", "#".repeat(80));
    println!(" DISCLAIMER - PLEASE READ CAREFULLY");
    println!("{}", "#".repeat(80));
    println!(" This tool is provided for informational purposes only and is NOT an official");
    println!(" Google product. It estimates log ingestion and lists sink configurations.");
    println!();
    println!(" BY PROCEEDING, YOU ACKNOWLEDGE THAT:");
    println!(" 1. YOU USE THIS TOOL AT YOUR OWN RISK.");
    println!(" 2. THE AUTHOR(S) ARE NOT LIABLE FOR ANY ERRORS, OMISSIONS, OR DAMAGES.");
    println!(" 3. THIS DOES NOT REPLACE YOUR OFFICIAL GOOGLE CLOUD INVOICE.");
    println!("{}\n", "#".repeat(80));
}

fn prompt(question: &str) -> Result<String> {
    print!("{question}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
