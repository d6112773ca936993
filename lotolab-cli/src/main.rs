mod display;
mod import;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::display::{
    display_calendar, display_candidate, display_draws, display_patterns, display_probabilities,
    display_report_summary, display_stats, display_suggestions, display_trend,
};
use crate::import::{load_draws, write_draws};
use lotolab_core::analysis::candidate::analyze_candidate;
use lotolab_core::analysis::intervals::intervals;
use lotolab_core::analysis::patterns::patterns;
use lotolab_core::analysis::probability::match_distribution;
use lotolab_core::analysis::temporal::{calendar_distribution, recent_trend};
use lotolab_core::analysis::frequencies;
use lotolab_core::config::AnalysisConfig;
use lotolab_core::models::{Combination, DrawSet, PICK_COUNT};
use lotolab_core::recommend::recommend_seeded;
use lotolab_core::report::ReportBuilder;
use lotolab_core::sampler::{date_seed, make_rng, simulate_draws};

#[derive(Parser)]
#[command(name = "lotolab", about = "Análise estatística da Lotofácil")]
struct Cli {
    /// Arquivo de configuração JSON
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Logs detalhados no stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Listar os últimos concursos
    List {
        /// Arquivo JSON de concursos
        #[arg(short, long)]
        input: PathBuf,

        /// Número de concursos a exibir
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// Frequências e intervalos de cada dezena
    Stats {
        #[arg(short, long)]
        input: PathBuf,

        /// Janela de análise (últimos N concursos)
        #[arg(short, long)]
        window: Option<usize>,
    },

    /// Padrões médios, tendência recente e calendário
    Patterns {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        window: Option<usize>,

        /// Concursos considerados na tendência
        #[arg(long)]
        trend_window: Option<usize>,
    },

    /// Probabilidades de acerto para uma aposta de N dezenas
    Probability {
        #[arg(short, long, default_value = "15")]
        selected: u32,
    },

    /// Analisar um jogo de 15 dezenas
    Analyze {
        /// As 15 dezenas do jogo
        #[arg(num_args = 1.., required = true)]
        numbers: Vec<i64>,

        /// Histórico para posicionar cada dezena no ranking
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Sugerir jogos a partir das faixas de frequência
    Recommend {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        window: Option<usize>,

        /// Número de jogos a sugerir
        #[arg(short, long, default_value = "5")]
        count: usize,

        /// Seed para reprodutibilidade (padrão: data do dia)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Gerar o relatório JSON com checksum e versão
    Report {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        window: Option<usize>,

        /// Arquivo de saída
        #[arg(short, long)]
        output: PathBuf,

        /// Jogos sugeridos incluídos no relatório
        #[arg(short, long, default_value = "0")]
        count: usize,

        #[arg(long)]
        seed: Option<u64>,

        /// Versão do relatório anterior
        #[arg(long)]
        previous_version: Option<u64>,
    },

    /// Gerar um histórico sintético de concursos uniformes
    Simulate {
        #[arg(short, long, default_value = "100")]
        count: usize,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value = "1")]
        first_id: u32,

        /// Data do primeiro concurso (AAAA-MM-DD)
        #[arg(long, default_value = "2024-01-01")]
        first_date: String,
    },

    /// Gravar a configuração padrão
    InitConfig {
        #[arg(short, long, default_value = "lotolab.json")]
        output: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };

    match cli.command {
        Command::List { input, last } => cmd_list(&input, last),
        Command::Stats { input, window } => cmd_stats(&input, window),
        Command::Patterns {
            input,
            window,
            trend_window,
        } => cmd_patterns(&config, &input, window, trend_window),
        Command::Probability { selected } => cmd_probability(selected),
        Command::Analyze { numbers, input } => cmd_analyze(&numbers, input.as_deref()),
        Command::Recommend {
            input,
            window,
            count,
            seed,
        } => cmd_recommend(&config, &input, window, count, seed),
        Command::Report {
            input,
            window,
            output,
            count,
            seed,
            previous_version,
        } => cmd_report(&config, &input, window, &output, count, seed, previous_version),
        Command::Simulate {
            count,
            seed,
            output,
            first_id,
            first_date,
        } => cmd_simulate(count, seed, &output, first_id, &first_date),
        Command::InitConfig { output } => {
            config.save(&output)?;
            println!("Configuração gravada em {}", output.display());
            Ok(())
        }
    }
}

fn load_window(input: &Path, window: Option<usize>) -> Result<DrawSet> {
    let draws = load_draws(input)?;
    Ok(match window {
        Some(w) => draws.latest(w),
        None => draws,
    })
}

fn report_empty(input: &Path) {
    println!("Nenhum concurso em {}. Gere um histórico com: lotolab simulate", input.display());
}

fn cmd_list(input: &Path, last: usize) -> Result<()> {
    let draws = load_draws(input)?;
    if draws.is_empty() {
        report_empty(input);
        return Ok(());
    }
    display_draws(&draws, last);
    Ok(())
}

fn cmd_stats(input: &Path, window: Option<usize>) -> Result<()> {
    let draws = load_window(input, window)?;
    if draws.is_empty() {
        report_empty(input);
        return Ok(());
    }
    display_stats(&frequencies(&draws), &intervals(&draws));
    Ok(())
}

fn cmd_patterns(
    config: &AnalysisConfig,
    input: &Path,
    window: Option<usize>,
    trend_window: Option<usize>,
) -> Result<()> {
    let draws = load_window(input, window)?;
    let Some(aggregate) = patterns(&draws).aggregate else {
        report_empty(input);
        return Ok(());
    };
    display_patterns(&aggregate, draws.len());

    let trend_window = trend_window.unwrap_or(config.trend_window);
    let trend = recent_trend(&draws, trend_window)?;
    display_trend(&trend, trend_window.min(draws.len()));

    display_calendar(&calendar_distribution(&draws));
    Ok(())
}

fn cmd_probability(selected: u32) -> Result<()> {
    let distribution = match_distribution(selected)?;
    display_probabilities(&distribution, selected);
    Ok(())
}

fn cmd_analyze(numbers: &[i64], input: Option<&Path>) -> Result<()> {
    let candidate = Combination::new(numbers)
        .with_context(|| format!("Um jogo tem exatamente {} dezenas distintas entre 1 e 25", PICK_COUNT))?;
    let table = match input {
        Some(path) => Some(frequencies(&load_draws(path)?)),
        None => None,
    };
    let analysis = analyze_candidate(&candidate, table.as_ref())?;
    display_candidate(&analysis);
    Ok(())
}

fn cmd_recommend(
    config: &AnalysisConfig,
    input: &Path,
    window: Option<usize>,
    count: usize,
    seed: Option<u64>,
) -> Result<()> {
    let draws = load_window(input, window)?;
    if draws.is_empty() {
        report_empty(input);
        return Ok(());
    }
    let seed = seed.unwrap_or_else(date_seed);
    let suggestions = recommend_seeded(&frequencies(&draws), count, &config.quota, seed)?;
    display_suggestions(&suggestions, seed);
    Ok(())
}

fn cmd_report(
    config: &AnalysisConfig,
    input: &Path,
    window: Option<usize>,
    output: &Path,
    count: usize,
    seed: Option<u64>,
    previous_version: Option<u64>,
) -> Result<()> {
    let draws = load_window(input, window)?;

    let mut builder = ReportBuilder::new(&draws, config);
    if count > 0 {
        builder = builder.recommendations(count, seed.unwrap_or_else(date_seed));
    }
    if let Some(previous) = previous_version {
        builder = builder.previous_version(previous);
    }
    let report = builder.seal()?;

    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(output, json).with_context(|| format!("Impossível gravar {:?}", output))?;
    display_report_summary(&report);
    Ok(())
}

fn cmd_simulate(count: usize, seed: Option<u64>, output: &Path, first_id: u32, first_date: &str) -> Result<()> {
    let start = NaiveDate::parse_from_str(first_date, "%Y-%m-%d")
        .with_context(|| format!("Data inválida: '{}'", first_date))?;
    let mut rng = make_rng(seed);
    let draws = simulate_draws(count, first_id, start, &mut rng)?;
    write_draws(output, &draws)?;
    println!("{} concursos gravados em {}", draws.len(), output.display());
    Ok(())
}
