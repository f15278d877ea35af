//! Command-line arguments.

use clap::{Parser, Subcommand};
use mockboard_core::{Corner, ElementKind, PropertyField, Theme};
use std::path::PathBuf;

/// Command-line arguments for mockboard.
#[derive(Debug, Parser)]
#[command(name = "mockboard")]
#[command(about = "Edit a Mockboard design from the terminal")]
#[command(version)]
pub struct CliArgs {
    /// Directory holding the saved design (defaults to the user data dir)
    #[arg(long, global = true, env = "MOCKBOARD_STORAGE_DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Editor settings file (JSON)
    #[arg(long, global = true, env = "MOCKBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Element ids may be abbreviated to any unique prefix.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add an element: rectangle, text, card or button
    Add { kind: ElementKind },

    /// List layers, topmost first
    List,

    /// Show the properties of an element
    Select { id: String },

    /// Drag an element by an offset
    #[command(allow_negative_numbers = true)]
    Move { id: String, dx: f64, dy: f64 },

    /// Drag one corner handle (tl, tr, bl, br) by an offset
    #[command(allow_negative_numbers = true)]
    Resize {
        id: String,
        corner: Corner,
        dx: f64,
        dy: f64,
    },

    /// Drag the rotation handle to a canvas point
    #[command(allow_negative_numbers = true)]
    Rotate {
        id: String,
        px: f64,
        py: f64,
        /// Snap to whole steps, as when holding Shift
        #[arg(long)]
        snap: bool,
    },

    /// Type a value into a properties field
    #[command(allow_negative_numbers = true)]
    Set {
        id: String,
        field: PropertyField,
        value: String,
    },

    /// Press a key with an element selected (Delete, Escape, ArrowUp, ...)
    Key { id: String, name: String },

    /// Set the canvas background, or `none` to reset it
    CanvasColor { color: String },

    /// Drop one layer row onto another, swapping their stacking order
    Raise { dragged: String, target: String },

    /// Delete an element
    Delete { id: String },

    /// Switch the editor theme
    Theme { name: Theme },

    /// Replace the layer note
    Note { text: String },

    /// Write the saved design as JSON
    ExportJson { path: PathBuf },

    /// Write the design as a static HTML page
    ExportHtml { path: PathBuf },

    /// Delete every element
    Clear {
        /// Confirm the clear
        #[arg(long)]
        yes: bool,
    },

    /// Print the keyboard shortcuts
    Shortcuts,
}
