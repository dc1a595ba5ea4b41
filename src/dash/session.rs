// The interactive mode: one command per line, the view is drawn again after
// each command.

use std::io::BufRead;

use crate::dash::config_reader::Settings;
use crate::dash::render::render_text;
use crate::dash::*;

const HELP: &str = "Commandes:
  search <texte>       recherche par nom (vide pour tout afficher)
  department <valeur>  filtre par département (vide pour tous)
  code <valeur>        filtre par code de nuance (vide pour tous)
  label <valeur>       filtre par libellé de nuance (vide pour tous)
  clear                supprime les filtres et la recherche
  page <n>             va à la page n
  next | prev          page suivante ou précédente
  go </|/chart|/pie>   ouvre une autre vue
  help                 affiche cette aide
  quit                 quitte
";

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Command {
    Search(String),
    Select(Field, Option<String>),
    Clear,
    Page(usize),
    Next,
    Previous,
    Go(String),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    let value = if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    };
    match word.to_lowercase().as_str() {
        "search" | "s" => Ok(Command::Search(rest.to_string())),
        "department" | "dept" => Ok(Command::Select(Field::Department, value)),
        "code" => Ok(Command::Select(Field::NuanceCode, value)),
        "label" => Ok(Command::Select(Field::NuanceLabel, value)),
        "clear" => Ok(Command::Clear),
        "page" | "p" => rest
            .parse::<usize>()
            .map(Command::Page)
            .map_err(|_| format!("Numéro de page invalide: {:?}", rest)),
        "next" | "n" => Ok(Command::Next),
        "prev" | "previous" => Ok(Command::Previous),
        "go" => Ok(Command::Go(rest.to_string())),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        _ => Err(format!("Commande inconnue: {:?} (tapez help)", word)),
    }
}

fn write_out<W: Write>(out: &mut W, text: &str) -> DashResult<()> {
    out.write_all(text.as_bytes())
        .context(WritingOutputSnafu { path: "stdout" })?;
    out.flush().context(WritingOutputSnafu { path: "stdout" })
}

/// Runs one command. Returns false when the session is over.
fn execute<W: Write>(
    cmd: Command,
    out: &mut W,
    nav: &mut Navigator,
    settings: &Settings,
) -> DashResult<bool> {
    if let Command::Go(path) = &cmd {
        if let Err(e) = open_view(nav, path, &settings.sources) {
            write_out(out, &format!("{}\n", e))?;
        }
        return Ok(true);
    }
    let view = match nav.current_mut() {
        Some(v) => v,
        None => whatever!("No view is open"),
    };
    match cmd {
        Command::Search(q) => {
            if !view.set_search(&q) {
                write_out(
                    out,
                    &format!("La vue {} n'a pas de recherche\n", view.kind().path()),
                )?;
            }
        }
        Command::Select(field, value) => {
            if !view.select(field, value.as_deref()) {
                write_out(
                    out,
                    &format!(
                        "La vue {} ne peut pas être filtrée par {}\n",
                        view.kind().path(),
                        field.source_key()
                    ),
                )?;
            }
        }
        Command::Clear => view.clear_filters(),
        Command::Page(p) => {
            view.go_to_page(p);
        }
        Command::Next => {
            view.next_page();
        }
        Command::Previous => {
            view.previous_page();
        }
        Command::Help => write_out(out, HELP)?,
        Command::Quit => return Ok(false),
        Command::Go(_) => {}
    }
    Ok(true)
}

fn draw<W: Write>(out: &mut W, nav: &Navigator, settings: &Settings) -> DashResult<()> {
    if let Some(view) = nav.current() {
        write_out(out, &render_text(&view.frame(), &settings.style))?;
    }
    write_out(out, "> ")
}

/// Reads commands from `input` until it is exhausted or a quit command.
pub fn run_interactive<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    nav: &mut Navigator,
    settings: &Settings,
) -> DashResult<()> {
    draw(out, nav, settings)?;
    for line in input.lines() {
        let line = line.context(OpeningFileSnafu { path: "stdin" })?;
        if line.trim().is_empty() {
            write_out(out, "> ")?;
            continue;
        }
        debug!("run_interactive: {:?}", line);
        match parse_command(&line) {
            Ok(cmd) => {
                if !execute(cmd, out, nav, settings)? {
                    break;
                }
                draw(out, nav, settings)?;
            }
            Err(msg) => write_out(out, &format!("{}\n> ", msg))?,
        }
    }
    nav.unmount();
    write_out(out, "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;
    use crate::dash::tests::temp_file;
    use std::io::Cursor;

    const RESULTS: &str = r#"[
        {"id": "1", "prenomCandidat": "Marie", "nomCandidat": "DUPONT", "departement": "Ain",
         "circonscription": "1", "codeNuance": "LR", "libelleNuance": "Les Républicains"},
        {"id": "2", "prenomCandidat": "Luc", "nomCandidat": "Martin", "departement": "Aisne",
         "circonscription": "2", "codeNuance": "RN", "libelleNuance": "Rassemblement National"},
        {"id": "3", "prenomCandidat": "Anne", "nomCandidat": "Petit", "departement": "Ain",
         "circonscription": "3", "codeNuance": "RN", "libelleNuance": "Rassemblement National"}
    ]"#;

    fn settings(name: &str) -> Settings {
        let args = Args {
            input: Some(temp_file(name, RESULTS)),
            page_size: Some(1),
            no_color: true,
            ..Args::default()
        };
        Settings::from_args(&args).unwrap()
    }

    fn run(name: &str, commands: &str) -> (String, Navigator) {
        let settings = settings(name);
        let mut nav = Navigator::new(settings.display.clone());
        open_view(&mut nav, "/", &settings.sources).unwrap();
        let mut out: Vec<u8> = Vec::new();
        run_interactive(Cursor::new(commands), &mut out, &mut nav, &settings).unwrap();
        (String::from_utf8(out).unwrap(), nav)
    }

    #[test]
    fn commands() {
        assert_eq!(
            parse_command("search  du pont "),
            Ok(Command::Search("du pont".to_string()))
        );
        assert_eq!(
            parse_command("code RN"),
            Ok(Command::Select(Field::NuanceCode, Some("RN".to_string())))
        );
        assert_eq!(
            parse_command("department"),
            Ok(Command::Select(Field::Department, None))
        );
        assert_eq!(parse_command("page 3"), Ok(Command::Page(3)));
        assert!(parse_command("page three").is_err());
        assert_eq!(parse_command("go /pie"), Ok(Command::Go("/pie".to_string())));
        assert_eq!(parse_command("Q"), Ok(Command::Quit));
        assert!(parse_command("vote").is_err());
    }

    #[test]
    fn session_pages_and_filters() {
        let (text, nav) = run("session-pages.json", "next\nnext\nnext\ncode RN\nquit\nnext\n");
        assert!(text.contains("Page 3 sur 3 (3 candidats)"));
        assert!(text.contains("Page 1 sur 2 (2 candidats)"));
        assert!(nav.current().is_none());
    }

    #[test]
    fn session_navigation() {
        let (text, _) = run(
            "session-nav.json",
            "go /pie\nlabel Les Républicains\nsearch dup\ngo /nowhere\ngo /chart\nlabel Les Républicains\nvote\n",
        );
        assert!(text.contains("Ain - RN"));
        assert!(text.contains("La vue /pie ne peut pas être filtrée par libelleNuance"));
        assert!(text.contains("La vue /pie n'a pas de recherche"));
        assert!(text.contains("■ Aisne - RN     1 (33.3%)"));
        assert!(text.contains("Unknown view \"/nowhere\""));
        assert!(text.contains("Nuance: Tous [Les Républicains] Rassemblement National"));
        assert!(text.contains("Commande inconnue"));
    }

    #[test]
    fn session_search() {
        let (text, _) = run("session-search.json", "search pet\nclear\nhelp\n");
        assert!(text.contains("Anne Petit - Ain, 3"));
        assert!(text.contains("Page 1 sur 1 (1 candidats)"));
        assert!(text.contains("Page 1 sur 3 (3 candidats)"));
        assert!(text.contains("Commandes:"));
    }
}
