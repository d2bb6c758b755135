//! Fill and print a K-map from the command line.
//!
//! Run with:
//!   cargo run --example kmap -- --vars 4 --minterms 0,2,8,10 --dont-cares 5
//!   cargo run --example kmap -- --vars 3 --expr "a'*b + c" --truth-table
//!   cargo run --example kmap -- --vars 2 --expr "a^b" --assign a=1,b=0

use clap::{ArgGroup, Parser};
use color_eyre::eyre::{eyre, WrapErr};

use kmap_rs::eval::{Assignment, Bit};
use kmap_rs::kmap::{KMap, Source};
use kmap_rs::parser::parse;
use kmap_rs::terms::parse_terms;
use kmap_rs::truth_table::TruthTable;

#[derive(Debug, Parser)]
#[command(author, version)]
#[command(group(ArgGroup::new("input").required(true).args(["minterms", "maxterms", "expr"])))]
struct Cli {
    /// Number of variables (2 to 4).
    #[arg(long, value_name = "INT", default_value = "4")]
    vars: usize,

    /// Comma-separated minterm indices.
    #[arg(long, value_name = "LIST")]
    minterms: Option<String>,

    /// Comma-separated maxterm indices.
    #[arg(long, value_name = "LIST")]
    maxterms: Option<String>,

    /// Boolean expression, e.g. "a'*b + a*b'".
    #[arg(long, value_name = "EXPR")]
    expr: Option<String>,

    /// Comma-separated don't-care indices.
    #[arg(long, value_name = "LIST", default_value = "")]
    dont_cares: String,

    /// Evaluate the expression at one point, e.g. "a=1,b=0".
    #[arg(long, value_name = "ASSIGNMENT", requires = "expr")]
    assign: Option<String>,

    /// Also print the truth table of the expression.
    #[arg(long, requires = "expr")]
    truth_table: bool,

    /// Log level.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: simplelog::LevelFilter,
}

fn parse_assignment(input: &str) -> color_eyre::Result<Assignment> {
    let mut assignment = Assignment::new();
    for pair in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| eyre!("Expected NAME=VALUE, got {:?}", pair))?;
        let mut chars = name.trim().chars();
        let name = match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_ascii_alphabetic() => ch,
            _ => return Err(eyre!("Variable names are single letters, got {:?}", name)),
        };
        let value: u8 = value
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid value for '{}'", name))?;
        let bit = Bit::try_from(value).map_err(|v| eyre!("Value of '{}' must be 0 or 1, got {}", name, v))?;
        assignment.set(name, bit);
    }
    Ok(assignment)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        args.log_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    log::debug!("args = {:?}", args);

    let kmap = KMap::new(args.vars)?;
    let dont_cares = parse_terms(&args.dont_cares)?;

    let filled = if let Some(expr) = &args.expr {
        let postfix = parse(expr)?;
        println!("postfix = {}", postfix);
        println!(
            "variables = {}",
            postfix.variables().into_iter().collect::<String>()
        );

        if let Some(assign) = &args.assign {
            let assignment = parse_assignment(assign)?;
            println!("f({}) = {}", assign, postfix.evaluate(&assignment)?);
        }

        if args.truth_table {
            let table = TruthTable::from_postfix(&postfix, args.vars)?;
            println!("{}", table);
        }

        kmap.fill(&Source::Expression {
            postfix: &postfix,
            dont_cares: &dont_cares,
        })?
    } else if let Some(minterms) = &args.minterms {
        let terms = parse_terms(minterms)?;
        kmap.fill(&Source::Minterms {
            terms: &terms,
            dont_cares: &dont_cares,
        })?
    } else if let Some(maxterms) = &args.maxterms {
        let terms = parse_terms(maxterms)?;
        kmap.fill(&Source::Maxterms {
            terms: &terms,
            dont_cares: &dont_cares,
        })?
    } else {
        unreachable!("clap requires one of --minterms, --maxterms, --expr");
    };

    println!("{}", filled);
    println!("minterms = {:?}", filled.minterms());
    println!("dont_cares = {:?}", filled.dont_cares());

    Ok(())
}
