//! Interactive shell over the drive store
//!
//! The shell is the view layer: it only renders query results and forwards
//! mutations, leaving the store as the sole authority for data.

use anyhow::Result;
use drive_core::{AppConfig, DriveStore, Item, ItemId, ViewMode};
use drive_persist::PersistentDrive;
use std::io::{self, BufRead, Write};

pub enum Outcome {
    Continue,
    Quit,
}

/// Run the shell loop until EOF or `quit`
pub fn run(mut drive: PersistentDrive, config: &AppConfig) -> Result<()> {
    println!("NAS Drive - type 'help' for commands");

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print!("{}", prompt(drive.store()));
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        if matches!(execute(&mut drive, config, &line, &mut input), Outcome::Quit) {
            break;
        }
    }

    Ok(())
}

fn prompt(store: &DriveStore) -> String {
    let path: Vec<&str> = store
        .current_path()
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    format!("nas:/{}> ", path.join("/"))
}

/// Execute one command line against the drive
pub fn execute(
    drive: &mut PersistentDrive,
    config: &AppConfig,
    line: &str,
    input: &mut impl BufRead,
) -> Outcome {
    let tokens = tokenize(line);
    let Some(command) = tokens.first() else {
        return Outcome::Continue;
    };
    let args: Vec<&str> = tokens[1..].iter().map(String::as_str).collect();

    match (command.as_str(), args.as_slice()) {
        ("help", _) | ("?", _) => print_help(),
        ("quit", _) | ("exit", _) => return Outcome::Quit,

        ("ls", []) => cmd_ls(drive.store()),
        ("tree", []) => cmd_tree(drive.store()),
        ("stats", []) => cmd_stats(drive.store()),
        ("info", [name]) => match resolve(drive.store(), name).and_then(|id| drive.store().get(&id))
        {
            Some(item) => println!("{}", describe(item)),
            None => println!("no such item: {}", name),
        },

        ("open", [name]) => match resolve(drive.store(), name) {
            Some(id) => report(drive.navigate_into(Some(&id))),
            None => println!("no such item: {}", name),
        },
        ("root", []) => report(drive.navigate_into(None)),
        ("up", []) => drive.navigate_up(),
        ("back", []) => {
            if !drive.navigate_back() {
                println!("history is empty");
            }
        }

        ("mkdir", [name]) => match drive.create_folder(name) {
            Ok(id) => println!("created folder {}", id),
            Err(e) => println!("{}", e.user_message()),
        },
        ("touch", [name, size]) => match size.parse::<u64>() {
            Ok(bytes) => match drive.add_file(name, bytes) {
                Ok(id) => println!("created file {}", id),
                Err(e) => println!("{}", e.user_message()),
            },
            Err(_) => println!("invalid size: {}", size),
        },
        ("rename", [name, new_name]) => match resolve(drive.store(), name) {
            Some(id) => report(drive.rename_item(&id, new_name)),
            None => println!("no such item: {}", name),
        },
        ("mv", [name, dest]) => cmd_mv(drive, name, dest),
        ("rm", [name]) => cmd_rm(drive, config, name, input),

        ("find", []) => {
            drive.set_search_query("");
            println!("search cleared");
        }
        ("find", _) => {
            drive.set_search_query(args.join(" "));
            cmd_ls(drive.store());
        }

        ("select", []) => cmd_show_selection(drive.store()),
        ("select", [name]) => match resolve(drive.store(), name) {
            Some(id) => {
                let selected = drive.toggle_selection(id);
                println!("{}", if selected { "selected" } else { "unselected" });
            }
            None => println!("no such item: {}", name),
        },
        ("unselect-all", []) => drive.clear_selection(),

        ("view", []) => println!("{}", view_label(drive.store().view_mode())),
        ("view", ["grid"]) => drive.set_view_mode(ViewMode::Grid),
        ("view", ["list"]) => drive.set_view_mode(ViewMode::List),
        ("theme", []) => {
            let dark = drive.toggle_dark_mode();
            println!("dark mode {}", if dark { "on" } else { "off" });
        }

        _ => println!("unknown command, try 'help'"),
    }

    Outcome::Continue
}

fn report(result: drive_core::Result<()>) {
    if let Err(e) = result {
        println!("{}", e.user_message());
    }
}

/// Resolve a name to an id: exact match among the current folder's children
/// first, then a raw id anywhere in the store
fn resolve(store: &DriveStore, name: &str) -> Option<ItemId> {
    if let Some(item) = store.current_items().iter().find(|item| item.name == name) {
        return Some(item.id.clone());
    }

    let id = ItemId::from(name);
    store.get(&id).map(|item| item.id.clone())
}

/// Resolve a move destination: `/` is the root, `..` the current folder's
/// parent, anything else a folder by name or id
fn resolve_dest(store: &DriveStore, dest: &str) -> Option<Option<ItemId>> {
    match dest {
        "/" => Some(None),
        ".." => {
            let parent = store
                .current_folder()
                .and_then(|id| store.get(id))
                .and_then(|item| item.parent_id.clone());
            Some(parent)
        }
        name => resolve(store, name).map(Some),
    }
}

fn cmd_mv(drive: &mut PersistentDrive, name: &str, dest: &str) {
    let Some(id) = resolve(drive.store(), name) else {
        println!("no such item: {}", name);
        return;
    };
    let Some(new_parent) = resolve_dest(drive.store(), dest) else {
        println!("no such destination: {}", dest);
        return;
    };
    report(drive.move_item(&id, new_parent.as_ref()));
}

fn cmd_rm(drive: &mut PersistentDrive, config: &AppConfig, name: &str, input: &mut impl BufRead) {
    let Some(id) = resolve(drive.store(), name) else {
        println!("no such item: {}", name);
        return;
    };

    if config.general.confirm_delete {
        let count = drive.store().descendant_ids(&id).len() + 1;
        print!("delete {} item(s)? [y/N] ", count);
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if input.read_line(&mut answer).is_err() || !answer.trim().eq_ignore_ascii_case("y") {
            println!("cancelled");
            return;
        }
    }

    match drive.delete_item(&id) {
        Ok(removed) => println!("deleted {} item(s)", removed),
        Err(e) => println!("{}", e.user_message()),
    }
}

fn cmd_ls(store: &DriveStore) {
    let items = store.search_children();
    if items.is_empty() {
        println!("(empty)");
        return;
    }

    match store.view_mode() {
        ViewMode::Grid => {
            let names: Vec<String> = items.iter().map(|item| grid_name(item)).collect();
            println!("{}", names.join("  "));
        }
        ViewMode::List => {
            for item in items {
                let marker = if store.selection().is_selected(&item.id) {
                    '*'
                } else {
                    ' '
                };
                println!(
                    "{} {:8} {:>10}  {}  {}",
                    marker,
                    item.kind.to_string(),
                    format_size(item.size),
                    format_date(&item.modified_at),
                    item.name
                );
            }
        }
    }
}

fn grid_name(item: &Item) -> String {
    if item.is_folder() {
        format!("{}/", item.name)
    } else {
        item.name.clone()
    }
}

fn cmd_tree(store: &DriveStore) {
    print_subtree(store, store.current_folder(), 0);
}

fn print_subtree(store: &DriveStore, parent: Option<&ItemId>, depth: usize) {
    for item in store.list_children(parent) {
        println!("{}{}", "  ".repeat(depth), grid_name(item));
        if item.is_folder() {
            print_subtree(store, Some(&item.id), depth + 1);
        }
    }
}

fn cmd_stats(store: &DriveStore) {
    let stats = store.storage_stats();
    let percent = if stats.total > 0 {
        stats.used as f64 * 100.0 / stats.total as f64
    } else {
        0.0
    };

    println!("used      {:>12}  ({:.1}%)", format_size(stats.used), percent);
    println!("total     {:>12}", format_size(stats.total));
    if stats.available >= 0 {
        println!("available {:>12}", format_size(stats.available as u64));
    } else {
        println!("available -{:>11}  (over capacity)", format_size(stats.available.unsigned_abs()));
    }
}

/// Per-item properties block rendered by `info`
fn describe(item: &Item) -> String {
    format!(
        "name      {}\n\
         kind      {}\n\
         size      {}\n\
         created   {}\n\
         modified  {}",
        item.name,
        item.kind,
        format_size(item.size),
        format_date(&item.created_at),
        format_date(&item.modified_at)
    )
}

fn cmd_show_selection(store: &DriveStore) {
    if store.selection().is_empty() {
        println!("nothing selected");
        return;
    }
    for id in store.selection().ids() {
        if let Some(item) = store.get(id) {
            println!("{}", item.name);
        }
    }
}

fn view_label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Grid => "grid",
        ViewMode::List => "list",
    }
}

fn print_help() {
    println!(
        "\
Commands:
  ls                     list the current folder (respects the active search)
  tree                   recursive listing from the current folder
  open <name>            enter a folder
  up                     go to the parent folder
  back                   return to the previously visited folder
  root                   jump to the root
  mkdir <name>           create a folder here
  touch <name> <bytes>   create a file here
  rename <name> <new>    rename an item
  mv <name> <dest>       move an item ('/' = root, '..' = parent, or folder)
  rm <name>              delete an item (folders delete recursively)
  info <name>            show an item's properties
  find [query]           filter this folder by name; no query clears
  select [name]          toggle selection, or show the current selection
  unselect-all           clear the selection
  view [grid|list]       show or change the view mode
  theme                  toggle dark mode
  stats                  storage usage
  quit                   exit"
    );
}

/// Split a command line into tokens, honoring double quotes
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Human-readable byte count ("0 B", "150.7 KB", "50 MB")
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut exp = 0;
    while value >= 1024.0 && exp < UNITS.len() - 1 {
        value /= 1024.0;
        exp += 1;
    }

    let mut text = format!("{:.2}", value);
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }

    format!("{} {}", text, UNITS[exp])
}

fn format_date(date: &chrono::DateTime<chrono::Utc>) -> String {
    date.format("%b %d, %Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn test_drive(dir: &tempfile::TempDir) -> (PersistentDrive, AppConfig) {
        let config = AppConfig::default();
        let drive = PersistentDrive::open_at(&config, dir.path().join("drive.json")).unwrap();
        (drive, config)
    }

    fn run_line(drive: &mut PersistentDrive, config: &AppConfig, line: &str) {
        execute(drive, config, line, &mut io::empty());
    }

    #[test]
    fn test_tokenize_plain_and_quoted() {
        assert_eq!(tokenize("ls"), vec!["ls"]);
        assert_eq!(tokenize("  mv  a  /  "), vec!["mv", "a", "/"]);
        assert_eq!(
            tokenize("rename \"client proposal.docx\" final.docx"),
            vec!["rename", "client proposal.docx", "final.docx"]
        );
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2_048), "2 KB");
        assert_eq!(format_size(154_320), "150.7 KB");
        assert_eq!(format_size(52_428_800), "50 MB");
        assert_eq!(format_size(1 << 40), "1 TB");
    }

    #[test]
    fn test_mkdir_open_up_flow() {
        let dir = tempfile::tempdir().unwrap();
        let (mut drive, config) = test_drive(&dir);

        run_line(&mut drive, &config, "mkdir Incoming");
        let id = resolve(drive.store(), "Incoming").unwrap();

        run_line(&mut drive, &config, "open Incoming");
        assert_eq!(drive.store().current_folder(), Some(&id));

        run_line(&mut drive, &config, "up");
        assert!(drive.store().navigation().at_root());
    }

    #[test]
    fn test_mv_to_root_and_parent() {
        let dir = tempfile::tempdir().unwrap();
        let (mut drive, config) = test_drive(&dir);

        run_line(&mut drive, &config, "open Documents");
        run_line(&mut drive, &config, "mv report-2024.docx /");

        let id = ItemId::from("file-1-1");
        assert_eq!(drive.store().get(&id).unwrap().parent_id, None);

        run_line(&mut drive, &config, "open Work");
        run_line(&mut drive, &config, "mv client-proposal.docx ..");
        let moved = drive.store().get(&ItemId::from("file-1-1-1")).unwrap();
        assert_eq!(moved.parent_id, Some(ItemId::from("folder-1")));
    }

    #[test]
    fn test_rm_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let (mut drive, config) = test_drive(&dir);
        let id = ItemId::from("folder-1");

        // Declined
        execute(&mut drive, &config, "rm Documents", &mut Cursor::new(b"n\n"));
        assert!(drive.store().get(&id).is_some());

        // Confirmed: the whole subtree goes
        execute(&mut drive, &config, "rm Documents", &mut Cursor::new(b"y\n"));
        assert!(drive.store().get(&id).is_none());
        assert!(drive.store().get(&ItemId::from("file-1-1-1")).is_none());
    }

    #[test]
    fn test_rm_without_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let (mut drive, mut config) = test_drive(&dir);
        config.general.confirm_delete = false;

        run_line(&mut drive, &config, "rm backup.zip");
        assert!(drive.store().get(&ItemId::from("file-3")).is_none());
    }

    #[test]
    fn test_find_sets_and_clears_query() {
        let dir = tempfile::tempdir().unwrap();
        let (mut drive, config) = test_drive(&dir);

        run_line(&mut drive, &config, "find readme");
        assert_eq!(drive.store().search_query(), "readme");
        assert_eq!(drive.store().search_children().len(), 1);

        run_line(&mut drive, &config, "find");
        assert_eq!(drive.store().search_query(), "");
    }

    #[test]
    fn test_info_describes_item() {
        let dir = tempfile::tempdir().unwrap();
        let (drive, _config) = test_drive(&dir);

        let item = drive.store().get(&ItemId::from("file-1")).unwrap();
        let text = describe(item);
        assert!(text.contains("name      README.txt"));
        assert!(text.contains("kind      document"));
        assert!(text.contains("size      2 KB"));
        assert!(text.contains("created   Jan 15, 2024 08:35"));
        assert!(text.contains("modified  Feb 14, 2024 10:15"));

        let folder = drive.store().get(&ItemId::from("folder-1")).unwrap();
        assert!(describe(folder).contains("kind      folder"));
        assert!(describe(folder).contains("size      0 B"));
    }

    #[test]
    fn test_view_and_theme_commands() {
        let dir = tempfile::tempdir().unwrap();
        let (mut drive, config) = test_drive(&dir);

        run_line(&mut drive, &config, "view list");
        assert_eq!(drive.store().view_mode(), ViewMode::List);

        run_line(&mut drive, &config, "theme");
        assert!(drive.store().dark_mode());
    }

    #[test]
    fn test_prompt_shows_breadcrumbs() {
        let dir = tempfile::tempdir().unwrap();
        let (mut drive, config) = test_drive(&dir);

        assert_eq!(prompt(drive.store()), "nas:/> ");
        run_line(&mut drive, &config, "open Documents");
        run_line(&mut drive, &config, "open Work");
        assert_eq!(prompt(drive.store()), "nas:/Documents/Work> ");
    }

    #[test]
    fn test_quit_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let (mut drive, config) = test_drive(&dir);
        assert!(matches!(
            execute(&mut drive, &config, "quit", &mut io::empty()),
            Outcome::Quit
        ));
    }
}
