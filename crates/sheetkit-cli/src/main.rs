//! Sheetkit CLI - address, number format and palette tool

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sheetkit::cell::range_coordinates;
use sheetkit::prelude::*;
use sheetkit::style::color_name;
use sheetkit::{
    column_to_letters, format_notation, hex_to_index_approx, hex_to_index_exact,
    letters_to_column, render_general, render_with_pattern, strip_sheet_qualifiers,
};

#[derive(Parser)]
#[command(name = "sheetkit")]
#[command(
    author,
    version,
    about = "Spreadsheet address, number format and palette tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert between column letters and 0-based column indices
    Column {
        /// Column letters (e.g. "AB") or a 0-based index
        value: String,
    },

    /// Show the sheets, coordinates and cell count of an address or range
    Address {
        /// A1 or R1C1 text, optionally sheet-qualified
        text: String,
    },

    /// Render a number the way the General format shows it
    General {
        #[arg(allow_hyphen_values = true)]
        number: f64,
    },

    /// Render a value through a number-format pattern
    Render {
        /// Number or text to render
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Number-format pattern (e.g. "#,##0.00;[Red](#,##0.00)")
        pattern: String,
    },

    /// Rewrite numeric text in plain or scientific notation
    Notation {
        #[arg(allow_hyphen_values = true)]
        number: String,

        #[arg(short, long, value_enum, default_value_t = NotationKind::Standard)]
        kind: NotationKind,
    },

    /// Find the palette index for a hex color
    Color {
        /// Color as #RRGGBB, RRGGBB or AARRGGBB
        hex: String,

        #[arg(short, long, value_enum, default_value_t = Channel::Font)]
        channel: Channel,

        /// Fail unless the palette holds the color exactly
        #[arg(short, long)]
        exact: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum NotationKind {
    Standard,
    Scientific,
    Excel,
}

impl From<NotationKind> for Notation {
    fn from(kind: NotationKind) -> Self {
        match kind {
            NotationKind::Standard => Notation::Standard,
            NotationKind::Scientific => Notation::Scientific,
            NotationKind::Excel => Notation::ScientificExcel,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Channel {
    Font,
    Fill,
    Border,
}

impl From<Channel> for ColorChannel {
    fn from(channel: Channel) -> Self {
        match channel {
            Channel::Font => ColorChannel::Font,
            Channel::Fill => ColorChannel::Foreground,
            Channel::Border => ColorChannel::Border,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Column { value } => column(&value),
        Commands::Address { text } => address(&text),
        Commands::General { number } => {
            println!("{}", render_general(number));
            Ok(())
        }
        Commands::Render { value, pattern } => render(&value, &pattern),
        Commands::Notation { number, kind } => {
            println!("{}", format_notation(&number, kind.into()));
            Ok(())
        }
        Commands::Color {
            hex,
            channel,
            exact,
        } => color(&hex, channel.into(), exact),
    }
}

fn column(value: &str) -> Result<()> {
    if let Ok(index) = value.parse::<u16>() {
        let letters = column_to_letters(index)
            .with_context(|| format!("Column index {} is out of range", index))?;
        println!("{}", letters);
    } else {
        let index = letters_to_column(value)
            .with_context(|| format!("'{}' is not a column", value))?;
        println!("{}", index);
    }
    Ok(())
}

fn address(text: &str) -> Result<()> {
    let qualifiers = strip_sheet_qualifiers(text);
    let coords =
        range_coordinates(text).with_context(|| format!("Failed to parse '{}'", text))?;

    if let Some(link) = &qualifiers.external_link1 {
        println!("External link: {}", link);
    }
    if let Some(sheet) = &qualifiers.sheet1 {
        println!("Sheet: {}", sheet);
    }
    if let Some(sheet) = &qualifiers.sheet2 {
        println!("Last sheet: {}", sheet);
    }
    println!("Body: {}", qualifiers.body);
    println!(
        "First: row {}, column {}",
        coords.first_row, coords.first_col
    );
    println!("Last: row {}, column {}", coords.last_row, coords.last_col);
    println!("Cells: {}", coords.cell_count);

    Ok(())
}

fn render(value: &str, pattern: &str) -> Result<()> {
    sheetkit::validate_pattern(pattern)
        .with_context(|| format!("Invalid number format '{}'", pattern))?;
    println!("{}", render_with_pattern(FormatValue::Text(value), pattern));
    Ok(())
}

fn color(hex: &str, channel: ColorChannel, exact: bool) -> Result<()> {
    let index = if exact {
        hex_to_index_exact(hex, channel)
            .with_context(|| format!("No palette entry for '{}'", hex))?
    } else {
        hex_to_index_approx(hex, channel)
    };

    match color_name(index) {
        Some(name) => println!("{}\t{}", index, name),
        None => println!("{}", index),
    }
    Ok(())
}
