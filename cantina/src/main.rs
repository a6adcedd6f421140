use cantinalib::{
    error::{CantinaError, Result},
    formats::{csv::Csv, json::Json, table::Table, xml::SimpleXml},
    traits::{ReadRecords, WriteRecords, WriteReport},
    BillingCalculator, PenaltyPolicy,
};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing::{debug, info};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum InFmt {
    Csv,
    Json,
    Xml,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutFmt {
    Csv,
    Json,
    Xml,
    Table,
}

#[derive(Parser, Debug)]
#[command(name = "cantina", version, about = "Счета школ: просрочка, пеня и проценты")]
struct Cli {
    /// Входной файл (по умолчанию stdin)
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Выходной файл (по умолчанию stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Формат входа
    #[arg(long = "in-format", value_enum)]
    in_format: InFmt,

    /// Формат выхода
    #[arg(long = "out-format", value_enum, default_value = "table")]
    out_format: OutFmt,

    /// Дата расчёта, YYYY-MM-DD (по умолчанию сегодня)
    #[arg(long = "today", env = "CANTINA_TODAY")]
    today: Option<NaiveDate>,

    /// Разовая пеня, доля от суммы
    #[arg(long = "penalty-rate", env = "CANTINA_PENALTY_RATE", default_value = "0.02")]
    penalty_rate: Decimal,

    /// Проценты за день просрочки, доля от суммы
    #[arg(long = "daily-interest-rate", env = "CANTINA_DAILY_INTEREST_RATE", default_value = "0.001")]
    daily_interest_rate: Decimal,

    /// Только просроченные счета
    #[arg(long = "overdue-only")]
    overdue_only: bool,

    /// Перегнать сами счета в другой формат вместо отчёта
    #[arg(long = "records")]
    records: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(|| chrono::Local::now().date_naive());
    let calc = BillingCalculator::new(PenaltyPolicy::new(cli.penalty_rate, cli.daily_interest_rate)?);
    debug!(%today, policy = ?calc.policy(), "starting");

    // reader
    let reader: Box<dyn io::Read> = match &cli.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let br = BufReader::new(reader);

    let mut records = match cli.in_format {
        InFmt::Csv => Csv::read(br),
        InFmt::Json => Json::read(br),
        InFmt::Xml => SimpleXml::read(br),
    }?;
    info!(count = records.len(), "records loaded");

    if cli.overdue_only {
        calc.retain_overdue(&mut records, today);
    }

    // writer
    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    if cli.records {
        match cli.out_format {
            OutFmt::Csv => Csv::write(&mut writer, &records),
            OutFmt::Json => Json::write(&mut writer, &records),
            OutFmt::Xml => SimpleXml::write(&mut writer, &records),
            OutFmt::Table => Err(CantinaError::Unsupported("table output is report-only")),
        }?;
    } else {
        let rows = calc.summarize_all(&records, today);
        match cli.out_format {
            OutFmt::Csv => Csv::write_report(&mut writer, &rows),
            OutFmt::Json => Json::write_report(&mut writer, &rows),
            OutFmt::Xml => SimpleXml::write_report(&mut writer, &rows),
            OutFmt::Table => Table::write_report(&mut writer, &rows),
        }?;
    }

    writer.flush().map_err(CantinaError::from)
}
