//! CLI commands for the kernel
//!
//! Implements the command handlers for the CLI interface.

use crate::config::KernelConfig;
use crate::core::{Address, Amount, Event, OperatorName, Receipt};
use crate::kernel::{Call, CallRequest, GovernedToken, KernelError};
use std::fs;
use std::path::Path;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Outcome of one script step
#[derive(Debug)]
pub struct StepOutcome {
    pub request: CallRequest,
    pub result: Result<Receipt, KernelError>,
}

/// Read a JSON array of `{ caller, call }` steps
pub fn load_script(path: &Path) -> CliResult<Vec<CallRequest>> {
    let contents = fs::read_to_string(path)?;
    let steps: Vec<CallRequest> = serde_json::from_str(&contents)?;
    log::info!("Loaded {} step(s) from {:?}", steps.len(), path);
    Ok(steps)
}

/// Apply every step in order; rejected steps do not stop the run
pub fn run_script(kernel: &mut GovernedToken, steps: Vec<CallRequest>) -> Vec<StepOutcome> {
    steps
        .into_iter()
        .map(|request| {
            let result = kernel.apply(request.caller, request.call.clone());
            StepOutcome { request, result }
        })
        .collect()
}

/// The conformance walkthrough: transfers, allowances, operator definition
pub fn demo_script(config: &KernelConfig) -> Vec<CallRequest> {
    let creator = config.creator;
    let owner = config.owner;
    let bob = Address::with_last_byte(0xb1);
    let carol = Address::with_last_byte(0xc1);
    let (x, y, z) = (
        Address::with_last_byte(0x01),
        Address::with_last_byte(0x02),
        Address::with_last_byte(0x03),
    );
    let tag = |t: &str| OperatorName::from_tag(t).unwrap_or_default();
    let step = |caller: Address, call: Call| CallRequest { caller, call };

    vec![
        step(
            creator,
            Call::Transfer {
                to: bob,
                value: Amount::ZERO,
            },
        ),
        step(
            creator,
            Call::Transfer {
                to: bob,
                value: Amount::from(100_000_000u64),
            },
        ),
        step(
            creator,
            Call::Approve {
                spender: bob,
                value: Amount::from(1000u64),
            },
        ),
        step(
            bob,
            Call::TransferFrom {
                from: creator,
                to: carol,
                value: Amount::from(1000u64),
            },
        ),
        step(
            bob,
            Call::TransferFrom {
                from: creator,
                to: carol,
                value: Amount::from(1u64),
            },
        ),
        step(
            creator,
            Call::Approve {
                spender: bob,
                value: Amount::from(1000u64),
            },
        ),
        step(
            creator,
            Call::DecreaseApproval {
                spender: bob,
                value: Amount::from(1500u64),
            },
        ),
        step(
            owner,
            Call::DefineOperators {
                names: vec![],
                addresses: vec![],
            },
        ),
        step(
            owner,
            Call::DefineOperators {
                names: vec![tag("LEGAL"), tag("REGULATOR")],
                addresses: vec![x, y],
            },
        ),
        step(
            bob,
            Call::DefineOperators {
                names: vec![tag("OP")],
                addresses: vec![bob],
            },
        ),
        step(
            owner,
            Call::DefineOperators {
                names: vec![tag("OP")],
                addresses: vec![z],
            },
        ),
        step(
            z,
            Call::Mint {
                to: carol,
                value: Amount::from(500u64),
            },
        ),
    ]
}

/// Run the built-in walkthrough against a fresh kernel
pub fn cmd_demo(config: &KernelConfig) -> CliResult<()> {
    let mut kernel = GovernedToken::from_config(config);

    println!("🪙 Demo ledger: {} ({})", config.token.name, config.token.symbol);
    println!("   Creator: {}", config.creator);
    println!("   Registry owner: {}", config.owner);

    let outcomes = run_script(&mut kernel, demo_script(config));
    print_outcomes(&outcomes);
    print_summary(&kernel);

    Ok(())
}

/// Run a script file against a fresh kernel
pub fn cmd_run(config: &KernelConfig, script: &Path) -> CliResult<()> {
    let steps = load_script(script)?;
    let mut kernel = GovernedToken::from_config(config);

    let outcomes = run_script(&mut kernel, steps);
    print_outcomes(&outcomes);
    print_summary(&kernel);

    if let Some(fatal) = outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().err())
        .find(|e| e.is_fatal())
    {
        return Err(Box::new(fatal.clone()));
    }
    Ok(())
}

fn print_outcomes(outcomes: &[StepOutcome]) {
    for (i, outcome) in outcomes.iter().enumerate() {
        println!(
            "\n{:>3}. {} by {}",
            i + 1,
            outcome.request.call.name(),
            outcome.request.caller
        );
        match &outcome.result {
            Ok(receipt) => print_receipt(receipt),
            Err(e) => println!("     ❌ {}", e),
        }
    }
}

fn print_receipt(receipt: &Receipt) {
    for event in receipt.iter() {
        let line = match event {
            Event::Transfer { from, to, value } => {
                format!("Transfer({} → {}, {})", from, to, value)
            }
            Event::Approval {
                owner,
                spender,
                value,
            } => format!("Approval({} → {}, {})", owner, spender, value),
            Event::OperatorsCleared { size } => format!("OperatorsCleared(size={})", size),
            Event::OperatorDefined { name, address } => {
                format!("OperatorDefined({}, {})", name, address)
            }
        };
        println!("     ✅ {}", line);
    }
}

fn print_summary(kernel: &GovernedToken) {
    let ledger = kernel.ledger();
    let registry = kernel.registry();

    println!("\n📊 Final state");
    println!("   Total supply: {}", ledger.total_supply());
    println!(
        "   Conserved: {}",
        if ledger.is_conserved() { "yes" } else { "NO" }
    );
    println!("   Holders:");
    let mut holders = ledger.holders();
    holders.sort();
    for (address, balance) in holders {
        println!("   ├─ {}: {}", address, balance);
    }
    println!("   Operators ({}):", registry.operator_count());
    for (i, binding) in registry.bindings().iter().enumerate() {
        println!("   ├─ [{}] {} = {}", i, binding.name, binding.address);
    }
    println!("   Events logged: {}", kernel.events().len());
}
