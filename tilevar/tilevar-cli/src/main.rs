// Copyright 2024 WHERE TRUE Technologies.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tilevar_config::plan::ImportPlan;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tilevar", about = "Validate a TileVar import configuration")]
struct Args {
    /// Path to the JSON import configuration document.
    config: PathBuf,

    #[clap(short, long, help = "Log loader activity to stderr")]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match tilevar_json::loader::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", args.config.display(), e);
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!(
        "loaded configuration with {} column partitions",
        config.column_partitions_count()
    );

    let plan = match ImportPlan::new(&config) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("{}: {}", args.config.display(), e);
            return ExitCode::FAILURE;
        }
    };

    for entry in plan.entries() {
        println!(
            "partition {}\t{}\t{}\t{}:{}",
            entry.index,
            entry.bounds,
            entry.vcf_file_name,
            entry.target.workspace(),
            entry.target.array_name(),
        );
    }

    ExitCode::SUCCESS
}
