use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use lotolab_core::analysis::candidate::CandidateAnalysis;
use lotolab_core::analysis::intervals::IntervalTable;
use lotolab_core::analysis::patterns::PatternAggregate;
use lotolab_core::analysis::probability::MatchProbability;
use lotolab_core::analysis::temporal::{CalendarDistribution, Trend, TrendEntry};
use lotolab_core::analysis::FrequencyTable;
use lotolab_core::models::{Combination, DrawSet};
use lotolab_core::report::Report;

const WEEKDAYS: [&str; 7] = ["Seg", "Ter", "Qua", "Qui", "Sex", "Sáb", "Dom"];

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "—".to_string())
}

pub fn display_draws(draws: &DrawSet, last: usize) {
    let mut table = new_table(vec!["Concurso", "Data", "Dezenas"]);
    for draw in draws.recent_first().take(last) {
        table.add_row(vec![
            draw.id().to_string(),
            draw.date().format("%d/%m/%Y").to_string(),
            format_numbers(draw.numbers().numbers()),
        ]);
    }
    println!("{table}");
}

pub fn display_stats(freq: &FrequencyTable, intervals: &IntervalTable) {
    println!(
        "\n📊 Estatísticas sobre {} concursos ({} dezenas sorteadas)\n",
        freq.draw_count(),
        freq.observed()
    );

    let mut table = new_table(vec![
        "Dezena",
        "Frequência",
        "Taxa",
        "Posição",
        "Atraso",
        "Intervalo médio",
        "Maior intervalo",
    ]);

    for entry in freq.ranking() {
        let summary = intervals
            .get(entry.number)
            .map(|r| r.summary())
            .unwrap_or_default();
        table.add_row(vec![
            format!("{:02}", entry.number),
            entry.frequency.to_string(),
            format!("{:.1}%", freq.hit_rate(entry.number) * 100.0),
            freq.rank_of(entry.number).to_string(),
            format_opt(summary.last_seen_gap),
            format_opt(summary.mean_gap.map(|g| format!("{:.2}", g))),
            format_opt(summary.max_gap),
        ]);
    }
    println!("{table}");
}

pub fn display_patterns(aggregate: &PatternAggregate, draw_count: usize) {
    println!("\n🔎 Padrões médios sobre {} concursos\n", draw_count);

    let mut table = new_table(vec!["Indicador", "Valor"]);
    let rows = [
        ("Soma", format!("{:.2}", aggregate.sum)),
        ("Média", format!("{:.2}", aggregate.mean)),
        (
            "Pares / Ímpares",
            format!("{:.2} / {:.2}", aggregate.even_count, aggregate.odd_count),
        ),
        (
            "Pares / Ímpares (%)",
            format!("{:.1}% / {:.1}%", aggregate.even_share, aggregate.odd_share),
        ),
        (
            "Baixas (1-12) / Altas (13-25)",
            format!("{:.2} / {:.2}", aggregate.low_count, aggregate.high_count),
        ),
        (
            "Maior sequência (média / máx.)",
            format!("{:.2} / {}", aggregate.longest_run, aggregate.max_longest_run),
        ),
        (
            "Repetidas do concurso anterior",
            format_opt(aggregate.mean_repeats.map(|r| format!("{:.2}", r))),
        ),
    ];
    for (label, value) in rows {
        table.add_row(vec![label.to_string(), value]);
    }
    println!("{table}");
}

pub fn display_trend(entries: &[TrendEntry], window: usize) {
    println!("\n📈 Tendência nos últimos {} concursos\n", window);

    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.recent_count.cmp(&a.recent_count).then(a.number.cmp(&b.number)));

    let mut table = new_table(vec!["Dezena", "Aparições", "Tendência"]);
    for entry in &sorted {
        let color = match entry.trend {
            Trend::High => Color::Green,
            Trend::Medium => Color::Yellow,
            Trend::Low => Color::Red,
        };
        table.add_row(vec![
            Cell::new(format!("{:02}", entry.number)),
            Cell::new(entry.recent_count.to_string()),
            Cell::new(entry.trend.to_string()).fg(color),
        ]);
    }
    println!("{table}");
}

pub fn display_calendar(calendar: &CalendarDistribution) {
    println!("\n📅 Distribuição por calendário\n");

    let mut table = new_table(vec!["Dia da semana", "Concursos"]);
    for (&day, count) in &calendar.by_weekday {
        let label = WEEKDAYS.get(day as usize).copied().unwrap_or("?");
        table.add_row(vec![label.to_string(), count.to_string()]);
    }
    println!("{table}");

    let mut table = new_table(vec!["Mês", "Concursos"]);
    for (month, count) in &calendar.by_month {
        table.add_row(vec![format!("{:02}", month), count.to_string()]);
    }
    println!("{table}");
}

pub fn display_probabilities(distribution: &[MatchProbability], selected: u32) {
    println!("\n🎯 Probabilidades de acerto jogando {} dezenas\n", selected);

    let mut table = new_table(vec!["Acertos", "Probabilidade", "%", "Chance"]);
    for p in distribution {
        table.add_row(vec![
            p.hits.to_string(),
            format!("{:.8}", p.probability),
            format!("{:.4}%", p.percent),
            p.one_in
                .map(|n| format!("1 em {}", n))
                .unwrap_or_else(|| "impossível".to_string()),
        ]);
    }
    println!("{table}");
}

pub fn display_candidate(analysis: &CandidateAnalysis) {
    println!("\n🧮 Jogo {}\n", analysis.numbers);

    let p = &analysis.pattern;
    let mut table = new_table(vec!["Soma", "Média", "Pares", "Ímpares", "Baixas", "Altas", "Sequência"]);
    table.add_row(vec![
        p.sum.to_string(),
        format!("{:.2}", p.mean),
        p.even_count.to_string(),
        p.odd_count.to_string(),
        p.low_count.to_string(),
        p.high_count.to_string(),
        p.longest_run.to_string(),
    ]);
    println!("{table}");

    if !analysis.ranking.is_empty() {
        let mut table = new_table(vec!["Dezena", "Frequência", "Posição"]);
        for rank in &analysis.ranking {
            table.add_row(vec![
                format!("{:02}", rank.number),
                rank.frequency.to_string(),
                rank.position.to_string(),
            ]);
        }
        println!("{table}");
    }

    let likely: Vec<&MatchProbability> = analysis
        .match_curve
        .iter()
        .filter(|m| m.hits >= 11)
        .collect();
    let mut table = new_table(vec!["Acertos", "Chance"]);
    for m in likely {
        table.add_row(vec![m.hits.to_string(), format_opt(m.one_in.map(|n| format!("1 em {}", n)))]);
    }
    println!("{table}");
}

pub fn display_suggestions(suggestions: &[Combination], seed: u64) {
    println!("\n🎲 Sugestões de jogos (seed {})\n", seed);

    let mut table = new_table(vec!["#", "Dezenas"]);
    for (i, combination) in suggestions.iter().enumerate() {
        table.add_row(vec![format!("{}", i + 1), combination.to_string()]);
    }
    println!("{table}");
}

pub fn display_report_summary(report: &Report) {
    println!("Relatório gerado:");
    println!("  Concursos: {}", report.row_count);
    println!(
        "  Intervalo: {} a {}",
        format_opt(report.contest_min),
        format_opt(report.contest_max)
    );
    println!("  Sugestões: {}", report.recommendations.len());
    println!("  Versão:    {}", format_opt(report.version));
    println!("  Checksum:  {}", format_opt(report.checksum.as_deref()));
}
