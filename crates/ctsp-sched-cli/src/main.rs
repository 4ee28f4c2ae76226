// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Turns a CTSP routing solution into a temporal schedule, or into an
//! infeasibility certificate when no schedule exists.

use clap::Parser;
use ctsp_sched_model::prelude::{Instance, ProblemType, Routing, SolutionCodec, SyncModel};
use ctsp_sched_solver::prelude::{ScheduleOutcome, Scheduler};
use std::{
    error::Error,
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing_subscriber::EnvFilter;

/// Schedule realizer for the Consistent Traveling Salesman Problem.
#[derive(Debug, Parser)]
#[command(name = "ctsp-sched", version)]
struct Args {
    /// Problem variant, "ctsp1" or "ctsp2".
    problem_type: ProblemType,
    /// TSPLIB instance file with CTSP extensions.
    instance_file: PathBuf,
    /// Routing solution file.
    solution_file: PathBuf,
    /// Directory the outputs are written to.
    output_path: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // Argument errors exit with 1; help and version output do not.
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let instance = Instance::from_path(&args.instance_file)?;
    let routing = Routing::from_path(&args.solution_file)?;

    let instance_name = args
        .instance_file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(instance.name())
        .to_string();

    tracing::info!(
        instance = %instance_name,
        problem_type = %args.problem_type,
        customers = instance.n_customers(),
        days = instance.n_days(),
        "realizing schedule"
    );

    let model = SyncModel::build(args.problem_type, &instance);
    let x = SolutionCodec::new(&model).routes_to_arc_vector(&routing)?;

    let mut scheduler = Scheduler::new(&model)?;
    match scheduler.solve(&instance_name, &x)? {
        ScheduleOutcome::Feasible(doc) => {
            let path = args.output_path.join(format!("{instance_name}.sched.json"));
            let mut w = BufWriter::new(File::create(&path)?);
            doc.write_json(&mut w)?;
            tracing::info!(file = %path.display(), "schedule written");
        }
        ScheduleOutcome::Infeasible(report) => {
            let paths_file =
                args.output_path.join(format!("{instance_name}_infeasible_paths.txt"));
            let graph_file =
                args.output_path.join(format!("{instance_name}_primal_dual_graph.dot"));
            write_report(&report, &model, &paths_file, &graph_file)?;
            tracing::info!(
                cycles = report.cycles().len(),
                "routing is infeasible, certificate written"
            );
        }
    }

    Ok(())
}

fn write_report(
    report: &ctsp_sched_solver::prelude::InfeasibilityReport,
    model: &SyncModel,
    paths_file: &Path,
    graph_file: &Path,
) -> Result<(), Box<dyn Error>> {
    let mut w = BufWriter::new(File::create(paths_file)?);
    report.write_infeasible_paths(model, &mut w)?;

    let mut w = BufWriter::new(File::create(graph_file)?);
    report.write_primal_dual_graph(model, &mut w)?;
    Ok(())
}
