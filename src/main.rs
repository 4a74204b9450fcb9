use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;

use pension::api::{ProjectionArgs, build_params, run_http_server, simulate_report};
use pension::core::{compare, simulate};
use pension::export::{write_csv_file, write_exports, write_xlsx_file};
use pension::report::{render_comparison, render_projection, render_summary};

#[derive(Debug, Parser)]
#[command(
    name = "pension",
    about = "Deterministic retirement savings projection with investment strategy comparison"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project one strategy and compare it with the other two.
    Simulate {
        #[command(flatten)]
        projection: ProjectionArgs,
        #[arg(long, help = "Write the yearly balances as CSV to this path")]
        csv: Option<PathBuf>,
        #[arg(long, help = "Write the yearly balances as an .xlsx workbook to this path")]
        xlsx: Option<PathBuf>,
        #[arg(
            long,
            help = "Write simulacion_pension.csv and simulacion_pension.xlsx into this directory"
        )]
        export_dir: Option<PathBuf>,
        #[arg(long, help = "Print the full result as JSON instead of tables")]
        json: bool,
    },
    /// Serve the JSON and export API over HTTP.
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Simulate {
            projection,
            csv,
            xlsx,
            export_dir,
            json,
        } => {
            let params = build_params(projection)?;
            info!(
                "projecting {} years, strategy {}",
                params.horizon_years,
                params.strategy.label()
            );

            let result = simulate(params);
            if json {
                println!("{}", serde_json::to_string_pretty(&simulate_report(params))?);
            } else {
                println!("{}", render_projection(&params, &result));
                println!("{}", render_summary(&result));
                println!("Comparación de Estrategias de Inversión");
                println!("{}", render_comparison(&compare(params)));
            }

            if let Some(path) = csv {
                write_csv_file(&result, &path)?;
            }
            if let Some(path) = xlsx {
                write_xlsx_file(&result, &path)?;
            }
            if let Some(dir) = export_dir {
                write_exports(&result, &dir)?;
            }
            Ok(())
        }
        Command::Serve { port } => {
            run_http_server(port).await?;
            Ok(())
        }
    }
}
