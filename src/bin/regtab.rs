//! regtab CLI - regression tables from JSON model results

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use regtab::{CovariateKey, LatexMode, Stargazer};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "regtab")]
#[command(version)]
#[command(about = "regtab - publication-style regression tables in HTML and LaTeX", long_about = None)]
struct Cli {
    /// JSON file with one model mapping or an array of them (reads stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Output encoding
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Emit only the tabularx environment (LaTeX)
    #[arg(long)]
    tabular_only: bool,

    /// Table title
    #[arg(short, long)]
    title: Option<String>,

    /// Italic banner over the model columns
    #[arg(long)]
    model_name: Option<String>,

    /// Single label spanning every model column
    #[arg(long)]
    column_label: Option<String>,

    /// Decimals shown for every number
    #[arg(short, long)]
    digits: Option<u32>,

    /// Significance cutoffs, comma separated (e.g. 0.1,0.05,0.01)
    #[arg(long, value_delimiter = ',')]
    sig_levels: Vec<f64>,

    /// Column label groups as LABEL:SPAN (repeatable, spans must cover every model)
    #[arg(long = "columns", value_parser = parse_column)]
    columns: Vec<(String, usize)>,

    /// Hide the title, column labels and model numbers
    #[arg(long)]
    no_header: bool,

    /// Hide the statistics and notes
    #[arg(long)]
    no_footer: bool,

    /// Hide the (1) (2) ... model numbers
    #[arg(long)]
    no_model_numbers: bool,

    /// Hide the Observations row
    #[arg(long)]
    no_n: bool,

    /// Hide the R2 row
    #[arg(long)]
    no_r2: bool,

    /// Hide the Adjusted R2 row
    #[arg(long)]
    no_adj_r2: bool,

    /// Hide the F Statistic row
    #[arg(long)]
    no_f_statistic: bool,

    /// Hide the notes section
    #[arg(long)]
    no_notes: bool,

    /// Put the first custom note on the label line instead of the legend
    #[arg(long)]
    no_append_notes: bool,

    /// Show confidence intervals instead of standard errors
    #[arg(long)]
    ci: bool,

    /// Hide the standard error / interval rows
    #[arg(long)]
    no_precision: bool,

    /// Hide significance stars
    #[arg(long)]
    no_stars: bool,

    /// Show degrees of freedom
    #[arg(long)]
    dof: bool,

    /// Show the residual standard error row
    #[arg(long)]
    residual_std_err: bool,

    /// Rename a covariate, as OLD=NEW (repeatable)
    #[arg(long, value_parser = parse_rename)]
    rename: Vec<(String, String)>,

    /// Covariates to show, in order, comma separated (group:name for grouped keys)
    #[arg(long, value_delimiter = ',')]
    order: Vec<String>,

    /// Custom note below the table (repeatable)
    #[arg(long)]
    note: Vec<String>,

    /// Label in front of the notes
    #[arg(long)]
    note_label: Option<String>,

    /// Escape markup characters in titles, labels, names and notes
    #[arg(long)]
    escape: bool,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// HTML table
    Html,
    /// LaTeX tabularx
    Latex,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Read input
    let input = match cli.input_file {
        Some(ref path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let mut table = match Stargazer::from_json_str(&input) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = apply_options(&mut table, &cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let result = match cli.format {
        Format::Html => table.render_html(),
        Format::Latex if cli.tabular_only => table.render_latex_with(LatexMode::TabularOnly),
        Format::Latex => table.render_latex(),
    };

    // Output
    match cli.output {
        Some(path) => {
            let mut file = fs::File::create(&path)?;
            writeln!(file, "{}", result)?;
            eprintln!(
                "✓ Table with {} model(s) written to: {}",
                table.num_models(),
                path
            );
        }
        None => {
            println!("{}", result);
        }
    }

    Ok(())
}

/// Apply command line options to the table
#[cfg(feature = "cli")]
fn apply_options(table: &mut Stargazer, cli: &Cli) -> regtab::Result<()> {
    if let Some(ref title) = cli.title {
        table.title(title.as_str());
    }
    if let Some(ref name) = cli.model_name {
        table.model_name(name.as_str());
    }
    if let Some(ref label) = cli.column_label {
        table.custom_column_label(label.as_str());
    }
    if let Some(digits) = cli.digits {
        table.significant_digits(digits)?;
    }
    if !cli.columns.is_empty() {
        let (labels, spans): (Vec<_>, Vec<_>) = cli.columns.iter().cloned().unzip();
        table.custom_columns(labels, spans)?;
    }
    if !cli.sig_levels.is_empty() {
        table.significance_levels(cli.sig_levels.iter().copied())?;
    }
    if !cli.rename.is_empty() {
        table.rename_covariates(cli.rename.iter().cloned());
    }
    if !cli.order.is_empty() {
        let keys = cli.order.iter().map(|name| parse_key(name));
        table.covariate_order(keys)?;
    }
    if !cli.note.is_empty() {
        table.add_custom_notes(cli.note.iter().cloned());
    }
    if let Some(ref label) = cli.note_label {
        table.custom_note_label(label.as_str());
    }

    table
        .show_header(!cli.no_header)
        .show_footer(!cli.no_footer)
        .show_model_numbers(!cli.no_model_numbers)
        .show_n(!cli.no_n)
        .show_r2(!cli.no_r2)
        .show_adj_r2(!cli.no_adj_r2)
        .show_f_statistic(!cli.no_f_statistic)
        .show_notes(!cli.no_notes)
        .append_notes(!cli.no_append_notes)
        .show_confidence_intervals(cli.ci)
        .show_precision(!cli.no_precision)
        .show_sig(!cli.no_stars)
        .show_degrees_of_freedom(cli.dof)
        .show_residual_std_err(cli.residual_std_err)
        .escape_text(cli.escape);
    Ok(())
}

/// `group:name` becomes a grouped key, anything else a flat one
#[cfg(feature = "cli")]
fn parse_key(name: &str) -> CovariateKey {
    if name.contains(':') {
        CovariateKey::nested(name.split(':')).unwrap_or_else(|| CovariateKey::new(name))
    } else {
        CovariateKey::new(name)
    }
}

#[cfg(feature = "cli")]
fn parse_rename(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((old, new)) if !old.is_empty() => Ok((old.to_string(), new.to_string())),
        _ => Err(format!("expected OLD=NEW, got '{}'", arg)),
    }
}

/// `LABEL:SPAN`, split at the last colon so labels may contain one
#[cfg(feature = "cli")]
fn parse_column(arg: &str) -> Result<(String, usize), String> {
    let (label, span) = arg
        .rsplit_once(':')
        .ok_or_else(|| format!("expected LABEL:SPAN, got '{}'", arg))?;
    let span = span
        .parse()
        .map_err(|_| format!("invalid column span '{}'", span))?;
    Ok((label.to_string(), span))
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install regtab --features cli");
    eprintln!("  regtab [OPTIONS] [INPUT_FILE]");
}
