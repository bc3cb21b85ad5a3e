use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{error, info, warn};

use study_tab::algorithm::matching::scoring::case_control_similarity;
use study_tab::algorithm::tabulation::{Table, default_specs, render_all};
use study_tab::utils::io::{write_table, write_table_to_dir};
use study_tab::utils::logging::log_warning;
use study_tab::{
    MatchingConfig, PartitionedMatcher, ScoredMatcher, StudyConfig, Subject, load_subjects,
    subjects_to_table,
};

mod cli;

use crate::cli::{Cli, Command, MatchArgs, ScoredMatchArgs, TabulateArgs};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => StudyConfig::from_json_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => StudyConfig::default(),
    };
    config.validate()?;

    let subjects = load_subjects(&cli.input, &config)
        .with_context(|| format!("Failed to load subjects from {}", cli.input.display()))?;
    info!("Loaded {} subjects", subjects.len());

    match cli.command {
        Command::Match(args) => run_match(&subjects, &config, &args),
        Command::ScoredMatch(args) => Ok(run_scored_match(&subjects, &config, &args)),
        Command::Tabulate(args) => run_tabulate(&subjects, &config, &args),
    }
}

fn run_match(subjects: &[Subject], config: &StudyConfig, args: &MatchArgs) -> Result<ExitCode> {
    let groups = match &args.group {
        Some(group) if config.case_groups.contains(group) => vec![group.clone()],
        Some(group) => bail!(
            "'{group}' is not a case group (expected one of: {})",
            config.case_groups.join(", ")
        ),
        None => config.case_groups.clone(),
    };

    let matching = MatchingConfig {
        show_progress: true,
        ..MatchingConfig::from_study(config)
    };
    let results = PartitionedMatcher::new(matching).match_all_groups(subjects, &groups);

    let mut matched = Vec::new();
    for (group, result) in &results {
        let relabeled = result.relabeled_subjects(&config.relabel_separator);
        if args.output.is_none() {
            println!("===== {group} =====");
            print!("{}", subjects_to_table(&relabeled, config).to_aligned_text());
        }
        if result.histogram.is_empty() {
            warn!("No pairs matched for {group}");
        } else {
            println!("{group}: {} pairs, age difference {}", result.len(), result.histogram.summary());
        }
        matched.extend(relabeled);
    }

    if let Some(path) = &args.output {
        write_table(path, &subjects_to_table(&matched, config), config.delimiter_byte()?)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn run_scored_match(subjects: &[Subject], config: &StudyConfig, args: &ScoredMatchArgs) -> ExitCode {
    let score = case_control_similarity(config.control_label.clone(), args.max_age_gap);
    let result = ScoredMatcher::new().match_items(subjects, score);

    let mut table = Table::new(["Score", "Control", "Case", "Group", "Age difference"]);
    for pair in &result.pairs {
        let (control, case) = if pair.a.is_control(&config.control_label) {
            (pair.a, pair.b)
        } else {
            (pair.b, pair.a)
        };
        table.push_row(vec![
            format!("{:.4}", pair.score),
            control.id.clone(),
            case.id.clone(),
            case.group.clone(),
            control.age_difference(case).to_string(),
        ]);
    }
    print!("{}", table.to_aligned_text());
    info!("{} subjects left unmatched", result.unmatched.len());
    ExitCode::SUCCESS
}

fn run_tabulate(subjects: &[Subject], config: &StudyConfig, args: &TabulateArgs) -> Result<ExitCode> {
    let matched_set: Vec<Subject>;
    let source = if args.matched {
        let matcher = PartitionedMatcher::new(MatchingConfig::from_study(config));
        matched_set = matcher
            .match_all_groups(subjects, &config.case_groups)
            .iter()
            .flat_map(|(_, result)| result.relabeled_subjects(&config.relabel_separator))
            .collect();
        info!("Tabulating {} matched subjects", matched_set.len());
        matched_set.as_slice()
    } else {
        subjects
    };

    // Output uses the input delimiter.
    let delimiter = config.delimiter_byte()?;
    let mut failed = 0usize;
    for (spec, result) in render_all(&default_specs(), source, config, args.matched) {
        match result {
            Ok(table) => {
                write_table_to_dir(&args.output_dir, &spec.name(), &table, delimiter)?;
            }
            Err(e) => {
                log_warning(&format!("Skipping table {}: {e}", spec.name()), Some(&args.output_dir));
                failed += 1;
            }
        }
    }

    if failed > 0 {
        error!("{failed} tables failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

