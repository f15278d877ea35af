//! Runs one CLI command against an editor session.

use crate::cli::{CliArgs, Command};
use anyhow::{Context, Result, anyhow, bail};
use kurbo::{Point, Vec2};
use mockboard_core::keyboard::ShortcutRegistry;
use mockboard_core::panels::PanelContent;
use mockboard_core::{
    Editor, EditorConfig, Element, ElementId, FileStorage, GestureKind, Key, LoadReport,
    Modifiers, Storage,
};
use std::io::Write;

/// Open the saved design and run the command.
pub fn run(args: CliArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let storage = match args.storage_dir {
        Some(dir) => FileStorage::new(dir)?,
        None => FileStorage::default_location()?,
    };
    log::debug!("Using storage at {}", storage.base_path().display());

    let (mut editor, report) = Editor::open(storage, config);
    if let LoadReport::Corrupt(reason) = &report {
        eprintln!("warning: {reason}; the saved design will be replaced on the next change");
    }

    let stdout = std::io::stdout();
    execute(&mut editor, args.command, &mut stdout.lock())
}

/// Apply one command to an open editor, writing results to `out`.
pub fn execute<S: Storage>(
    editor: &mut Editor<S>,
    command: Command,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Add { kind } => {
            let id = editor.create_element(kind);
            writeln!(out, "{id}")?;
        }
        Command::List => {
            for row in editor.layers().rows() {
                let Some(element) = editor.element(&row.id) else {
                    continue;
                };
                writeln!(out, "{:>3}  {:<14} {}", row.z_index, row.label, summary(element))?;
            }
            if !editor.note().text.is_empty() {
                writeln!(out, "note: {}", editor.note().text)?;
            }
        }
        Command::Select { id } => {
            let id = resolve_id(editor, &id)?;
            editor.select(&id)?;
            print_properties(editor, out)?;
        }
        Command::Move { id, dx, dy } => {
            let id = resolve_id(editor, &id)?;
            let start = frame_of(editor, &id)?.center();
            let end = start + Vec2::new(dx, dy);
            drag(editor, &id, GestureKind::Drag, start, end, Modifiers::NONE)?;
            print_element(editor, &id, out)?;
        }
        Command::Resize { id, corner, dx, dy } => {
            let id = resolve_id(editor, &id)?;
            let start = corner.point_on(frame_of(editor, &id)?);
            let end = start + Vec2::new(dx, dy);
            drag(editor, &id, GestureKind::Resize(corner), start, end, Modifiers::NONE)?;
            print_element(editor, &id, out)?;
        }
        Command::Rotate { id, px, py, snap } => {
            let id = resolve_id(editor, &id)?;
            let frame = frame_of(editor, &id)?;
            let start = Point::new(frame.center().x, frame.y0);
            let modifiers = if snap { Modifiers::SHIFT } else { Modifiers::NONE };
            drag(editor, &id, GestureKind::Rotate, start, Point::new(px, py), modifiers)?;
            print_element(editor, &id, out)?;
        }
        Command::Set { id, field, value } => {
            let id = resolve_id(editor, &id)?;
            editor.select(&id)?;
            editor.edit_property(field, &value)?;
            print_element(editor, &id, out)?;
        }
        Command::Key { id, name } => {
            let id = resolve_id(editor, &id)?;
            editor.select(&id)?;
            let key = Key::from_name(&name);
            if !editor.key_down(&key)? {
                bail!("Key {} does nothing", key.name());
            }
            match editor.element(&id) {
                Some(element) => writeln!(out, "{}", summary(element))?,
                None => writeln!(out, "deleted {id}")?,
            }
        }
        Command::CanvasColor { color } => {
            let color = (!color.eq_ignore_ascii_case("none")).then_some(color);
            editor.set_canvas_color(color)?;
        }
        Command::Raise { dragged, target } => {
            let dragged = resolve_id(editor, &dragged)?;
            let target = resolve_id(editor, &target)?;
            if !editor.swap_layers(&dragged, &target)? {
                bail!("Nothing to swap");
            }
        }
        Command::Delete { id } => {
            let id = resolve_id(editor, &id)?;
            let removed = editor.delete_element(&id)?;
            writeln!(out, "deleted {} {}", removed.kind, removed.id)?;
        }
        Command::Theme { name } => editor.set_theme(name),
        Command::Note { text } => editor.set_note(text),
        Command::ExportJson { path } => {
            let download = editor.export_json()?;
            download
                .write_to(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            writeln!(out, "wrote {} ({} bytes)", path.display(), download.contents.len())?;
        }
        Command::ExportHtml { path } => {
            let download = editor.export_html()?;
            download
                .write_to(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            writeln!(out, "wrote {} ({} bytes)", path.display(), download.contents.len())?;
        }
        Command::Clear { yes } => {
            if !editor.clear(|| yes) {
                bail!("Refusing to clear without --yes");
            }
        }
        Command::Shortcuts => writeln!(out, "{}", ShortcutRegistry::describe())?,
    }
    Ok(())
}

/// Find the element whose id is `prefix` or starts with it.
fn resolve_id<S: Storage>(editor: &Editor<S>, prefix: &str) -> Result<ElementId> {
    let exact = ElementId::from(prefix);
    if editor.elements().contains(&exact) {
        return Ok(exact);
    }
    let matches: Vec<&ElementId> = editor
        .elements()
        .iter()
        .map(|e| &e.id)
        .filter(|id| id.as_str().starts_with(prefix))
        .collect();
    match matches.as_slice() {
        [id] => Ok((*id).clone()),
        [] => Err(anyhow!("No element matches {prefix}")),
        _ => Err(anyhow!("{prefix} matches {} elements", matches.len())),
    }
}

fn frame_of<S: Storage>(editor: &Editor<S>, id: &ElementId) -> Result<kurbo::Rect> {
    editor
        .view()
        .node(id)
        .map(|node| node.frame)
        .ok_or_else(|| anyhow!("No element {id}"))
}

/// One full pointer gesture: press at `from`, move to `to`, release.
fn drag<S: Storage>(
    editor: &mut Editor<S>,
    id: &ElementId,
    kind: GestureKind,
    from: Point,
    to: Point,
    modifiers: Modifiers,
) -> Result<()> {
    editor.select(id)?;
    if !editor.begin_gesture(id, kind, from)? {
        bail!("Another gesture is in progress");
    }
    editor.pointer_move(to, modifiers);
    editor
        .pointer_up()
        .map(|_| ())
        .ok_or_else(|| anyhow!("Gesture on {id} was lost"))
}

fn summary(element: &Element) -> String {
    let mut line = format!(
        "{} {} at ({}, {}) {}x{} {}",
        element.id, element.kind, element.x, element.y, element.width, element.height, element.color
    );
    if element.rotation != 0.0 {
        line.push_str(&format!(" rot {}°", element.rotation));
    }
    if element.kind.is_text_bearing() {
        line.push_str(&format!(" {:?}", element.text));
    }
    line
}

fn print_element<S: Storage>(
    editor: &Editor<S>,
    id: &ElementId,
    out: &mut impl Write,
) -> Result<()> {
    let element = editor
        .element(id)
        .ok_or_else(|| anyhow!("No element {id}"))?;
    writeln!(out, "{}", summary(element))?;
    Ok(())
}

fn print_properties<S: Storage>(editor: &Editor<S>, out: &mut impl Write) -> Result<()> {
    match editor.properties().content() {
        PanelContent::Element { rows, .. } => {
            for row in rows {
                writeln!(out, "{:<10} {}", row.field.label(), row.value)?;
            }
        }
        PanelContent::Canvas { color } => writeln!(out, "{:<10} {}", "Canvas", color)?,
    }
    Ok(())
}
