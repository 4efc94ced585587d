use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use finite_automata::{
    automaton::{Automaton, Language, dfa::DFA},
    config::AutomataConfig,
    logger::init_tracing,
    regex::from_regex,
    render::{GraphvizRenderer, render_automaton},
    serialization::{AutomatonSerializer, JsonSerializer},
};

#[derive(Parser, Debug)]
#[command(name = "fa")]
#[command(version = "0.1")]
#[command(about = "Build, minimize and convert finite automata", long_about = None)]
struct Args {
    /// TOML file with logger and renderer settings.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a regular expression and check which words it accepts.
    Check {
        regex: String,
        words: Vec<String>,
        /// Check against the minimal DFA instead of the NFA.
        #[arg(short, long)]
        minimize: bool,
    },
    /// Print the DOT graph of a regular expression, or render it to a file.
    Dot {
        regex: String,
        #[arg(short, long)]
        render: Option<PathBuf>,
        /// Show the minimal DFA instead of the NFA.
        #[arg(short, long)]
        minimize: bool,
    },
    /// Save the minimal DFA of a regular expression.
    Save {
        regex: String,
        file: PathBuf,
        /// Write a JSON document instead of the binary format.
        #[arg(long)]
        json: bool,
    },
    /// Load a saved DFA and check which words it accepts.
    Load {
        file: PathBuf,
        words: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Convert a regular expression into its minimal DFA and back.
    ToRegex { regex: String },
}

fn minimal_dfa(regex: &str) -> anyhow::Result<DFA> {
    let nfa = from_regex(regex).with_context(|| format!("failed to compile {regex:?}"))?;
    Ok(nfa.determinize().minimize())
}

fn print_verdicts(automaton: &impl Language, words: &[String]) {
    for word in words {
        if automaton.accepts(word) {
            println!("{} {:?}", "accepted".bright_green(), word);
        } else {
            println!("{} {:?}", "rejected".bright_red(), word);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = AutomataConfig::from_optional_file(args.config.as_ref())?;
    if let Some(path) = init_tracing(config.get_logger())? {
        eprintln!(
            "[{}] logging to {}",
            config.get_logger().get_log_level().tag(),
            path.display()
        );
    }

    match args.command {
        Commands::Check {
            regex,
            words,
            minimize,
        } => {
            if minimize {
                print_verdicts(&minimal_dfa(&regex)?, &words);
            } else {
                let nfa = from_regex(&regex).with_context(|| format!("failed to compile {regex:?}"))?;
                print_verdicts(&nfa, &words);
            }
        }
        Commands::Dot {
            regex,
            render,
            minimize,
        } => {
            let renderer = GraphvizRenderer::from_config(config.get_render());

            if minimize {
                let dfa = minimal_dfa(&regex)?;
                match render {
                    Some(output) => render_automaton(&dfa, &renderer, output)?,
                    None => print!("{}", dfa.to_graphviz()),
                }
            } else {
                let nfa = from_regex(&regex).with_context(|| format!("failed to compile {regex:?}"))?;
                match render {
                    Some(output) => render_automaton(&nfa, &renderer, output)?,
                    None => print!("{}", nfa.to_graphviz()),
                }
            }
        }
        Commands::Save { regex, file, json } => {
            let dfa = minimal_dfa(&regex)?;

            if json {
                let writer = File::create(&file)
                    .with_context(|| format!("failed to create {}", file.display()))?;
                JsonSerializer::serialize(&dfa, writer)?;
            } else {
                dfa.save_to_file(&file)
                    .with_context(|| format!("failed to save DFA to {}", file.display()))?;
            }

            println!(
                "saved DFA with {} states to {}",
                dfa.state_count(),
                file.display()
            );
        }
        Commands::Load { file, words, json } => {
            let dfa = if json {
                let reader = File::open(&file)
                    .with_context(|| format!("failed to open {}", file.display()))?;
                JsonSerializer::deserialize::<DFA, _>(BufReader::new(reader))?
            } else {
                let mut dfa = DFA::new();
                dfa.load_from_file(&file)
                    .with_context(|| format!("failed to load DFA from {}", file.display()))?;
                dfa
            };

            print_verdicts(&dfa, &words);
        }
        Commands::ToRegex { regex } => {
            println!("{}", minimal_dfa(&regex)?.to_regex());
        }
    }

    Ok(())
}
