use flexi_logger::{FileSpec, Logger};
use jumpga::param;
use jumpga::run;
use jumpga::utils::display_outcome;
use log::{error, warn};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

fn main() {
    let args: Vec<String> = env::args().collect();
    let param_file = if args.len() > 1 {
        args[1].clone()
    } else {
        "param.yaml".to_string()
    };

    let param = match param::get(param_file.clone()) {
        Ok(param) => param,
        Err(e) => {
            eprintln!("Cannot load parameter file {}: {}", param_file, e);
            std::process::exit(1);
        }
    };

    let logger = Logger::try_with_env_or_str(&param.general.log_level).unwrap();
    // Keep the handle alive for the whole run, dropping it stops logging
    let _logger = if param.general.log_base.is_empty() {
        logger.start().unwrap()
    } else {
        logger
            .log_to_file(
                FileSpec::default()
                    .basename(param.general.log_base.clone())
                    .suffix(param.general.log_suffix.clone()),
            )
            .start()
            .unwrap()
    };

    if param.general.thread_number > 0 {
        // Fitness evaluation is the only parallel section
        rayon::ThreadPoolBuilder::new()
            .num_threads(param.general.thread_number)
            .build_global()
            .unwrap();
    }

    let running = Arc::new(AtomicBool::new(true));
    let mut signals = Signals::new([SIGINT, SIGTERM]).unwrap();
    let handle = running.clone();
    thread::spawn(move || {
        for signal in signals.forever() {
            warn!("Received signal {}, stopping after the current generation", signal);
            handle.store(false, Ordering::Relaxed);
        }
    });

    match run(&param, running) {
        Ok(experiment) => {
            for outcome in &experiment.outcomes {
                println!(
                    "====================================================================================="
                );
                print!("{}", display_outcome(outcome));
            }
            println!();
            println!(
                "GA Accuracy: {:.2}% over {} board(s) in {:.2}s",
                experiment.accuracy_pct,
                experiment.outcomes.len(),
                experiment.execution_time
            );

            if !param.general.save_exp.is_empty() {
                if let Err(e) = experiment.save_json(&param.general.save_exp) {
                    error!("Cannot save experiment to {}: {}", param.general.save_exp, e);
                }
            }
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
