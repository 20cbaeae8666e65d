use hbnb_store::Storage;
use hbnb_types::{Record, RecordKind};

use crate::diagnostic::Diagnostic;
use crate::parse::{self, Change, Verb};

/// What a command prints on success, if anything.
pub type Outcome = Result<Option<String>, Diagnostic>;

pub fn run_command(storage: &mut Storage, verb: Verb, args: &str) -> Outcome {
    match verb {
        Verb::Create => cmd_create(storage, args),
        Verb::Show => cmd_show(storage, args),
        Verb::Destroy => cmd_destroy(storage, args),
        Verb::All => cmd_all(storage, args),
        Verb::Count => cmd_count(storage, args),
        Verb::Update => cmd_update(storage, args),
        Verb::Help => cmd_help(args),
        Verb::Quit | Verb::Eof => Ok(None),
    }
}

fn require_kind(word: Option<&str>) -> Result<RecordKind, Diagnostic> {
    let name = word.ok_or(Diagnostic::ClassNameMissing)?;
    name.parse().map_err(|_| Diagnostic::ClassDoesNotExist)
}

fn require_id<'a>(word: Option<&'a str>) -> Result<&'a str, Diagnostic> {
    word.map(parse::unquote).ok_or(Diagnostic::InstanceIdMissing)
}

fn at_most(words: &[&str], limit: usize) -> Result<(), Diagnostic> {
    if words.len() > limit {
        return Err(Diagnostic::InvalidArgumentCount);
    }
    Ok(())
}

fn cmd_create(storage: &mut Storage, args: &str) -> Outcome {
    let words: Vec<&str> = args.split_whitespace().collect();
    let kind = require_kind(words.first().copied())?;
    at_most(&words, 1)?;
    let record = storage.create(kind)?;
    Ok(Some(record.id().to_string()))
}

fn cmd_show(storage: &Storage, args: &str) -> Outcome {
    let words: Vec<&str> = args.split_whitespace().collect();
    let kind = require_kind(words.first().copied())?;
    let id = require_id(words.get(1).copied())?;
    at_most(&words, 2)?;
    storage
        .get(kind, id)
        .map(|record| Some(record.render()))
        .ok_or(Diagnostic::NoInstanceFound)
}

fn cmd_destroy(storage: &mut Storage, args: &str) -> Outcome {
    let words: Vec<&str> = args.split_whitespace().collect();
    let kind = require_kind(words.first().copied())?;
    let id = require_id(words.get(1).copied())?;
    at_most(&words, 2)?;
    match storage.destroy(kind, id)? {
        Some(_) => Ok(None),
        None => Err(Diagnostic::NoInstanceFound),
    }
}

fn cmd_all(storage: &Storage, args: &str) -> Outcome {
    let words: Vec<&str> = args.split_whitespace().collect();
    let kind = match words.first() {
        Some(name) => Some(require_kind(Some(*name))?),
        None => None,
    };
    at_most(&words, 1)?;
    let rendered: Vec<String> = storage.all(kind).map(Record::render).collect();
    Ok(Some(format!("[{}]", rendered.join(", "))))
}

fn cmd_count(storage: &Storage, args: &str) -> Outcome {
    let words: Vec<&str> = args.split_whitespace().collect();
    let kind = require_kind(words.first().copied())?;
    at_most(&words, 1)?;
    Ok(Some(storage.count(Some(kind)).to_string()))
}

fn cmd_update(storage: &mut Storage, args: &str) -> Outcome {
    let (kind_word, rest) = parse::split_word(args);
    let kind = require_kind(Some(kind_word).filter(|w| !w.is_empty()))?;
    let (id_word, rest) = parse::split_word(rest);
    let id = require_id(Some(id_word).filter(|w| !w.is_empty()))?;
    if storage.get(kind, id).is_none() {
        return Err(Diagnostic::NoInstanceFound);
    }

    let change = parse::parse_change(rest)?;
    let updated = storage.update(kind, id, |record| match change {
        Change::Attribute { name, value } => record.set_attribute(&name, value),
        Change::Attributes(map) => record.merge(map),
    })?;
    match updated {
        Some(_) => Ok(None),
        None => Err(Diagnostic::NoInstanceFound),
    }
}

fn cmd_help(args: &str) -> Outcome {
    let topic = args.trim();
    if topic.is_empty() {
        let header = "Documented commands (type help <topic>):";
        let names: Vec<&str> = Verb::ALL.iter().map(Verb::name).collect();
        return Ok(Some(format!(
            "{header}\n{}\n{}",
            "=".repeat(header.len()),
            names.join("  ")
        )));
    }
    Verb::from_word(topic)
        .map(|verb| Some(verb.usage().to_string()))
        .ok_or_else(|| Diagnostic::NoHelp(topic.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_store::{MemoryBackend, ReloadPolicy};
    use serde_json::json;

    fn storage() -> Storage {
        Storage::with_backend(Box::new(MemoryBackend::new()), ReloadPolicy::Fail)
    }

    fn run(storage: &mut Storage, line: &str) -> Outcome {
        let inv = parse::parse_line(line).unwrap().unwrap();
        run_command(storage, inv.verb, &inv.args)
    }

    #[test]
    fn create_prints_the_new_id() {
        let mut storage = storage();
        let id = run(&mut storage, "create User").unwrap().unwrap();
        assert!(storage.get(RecordKind::User, &id).is_some());
    }

    #[test]
    fn argument_checks_run_in_order() {
        let mut storage = storage();
        assert_eq!(run(&mut storage, "show").unwrap_err(), Diagnostic::ClassNameMissing);
        assert_eq!(run(&mut storage, "show Ghost").unwrap_err(), Diagnostic::ClassDoesNotExist);
        assert_eq!(run(&mut storage, "show Ghost 1 2").unwrap_err(), Diagnostic::ClassDoesNotExist);
        assert_eq!(run(&mut storage, "show User").unwrap_err(), Diagnostic::InstanceIdMissing);
        assert_eq!(run(&mut storage, "show User 1 2").unwrap_err(), Diagnostic::InvalidArgumentCount);
        assert_eq!(run(&mut storage, "show User 1").unwrap_err(), Diagnostic::NoInstanceFound);
    }

    #[test]
    fn every_accepted_kind_survives_reload() {
        let backend = MemoryBackend::new();
        let mut storage = Storage::with_backend(Box::new(backend.clone()), ReloadPolicy::Fail);
        for kind in RecordKind::ALL {
            run(&mut storage, &format!("create {kind}")).unwrap();
        }
        let mut reloaded = Storage::with_backend(Box::new(backend), ReloadPolicy::Fail);
        assert_eq!(reloaded.reload().unwrap(), RecordKind::ALL.len());
        assert_eq!(reloaded.registry(), storage.registry());
    }

    #[test]
    fn unknown_kind_never_touches_the_store() {
        let backend = MemoryBackend::new();
        let mut storage = Storage::with_backend(Box::new(backend.clone()), ReloadPolicy::Fail);
        let id = run(&mut storage, "create User").unwrap().unwrap();
        let document = backend.document();

        for line in [
            "create Bogus".to_string(),
            "show Bogus 123".to_string(),
            format!("destroy Bogus {id}"),
            "all Bogus".to_string(),
            "count Bogus".to_string(),
            format!("update Bogus {id} name x"),
        ] {
            assert_eq!(run(&mut storage, &line).unwrap_err(), Diagnostic::ClassDoesNotExist);
        }
        assert_eq!(backend.document(), document);
        assert_eq!(storage.count(None), 1);
    }

    #[test]
    fn create_rejects_extra_arguments() {
        let mut storage = storage();
        assert_eq!(
            run(&mut storage, "create User extra").unwrap_err(),
            Diagnostic::InvalidArgumentCount
        );
        assert_eq!(storage.count(None), 0);
    }

    #[test]
    fn show_accepts_quoted_id() {
        let mut storage = storage();
        let id = run(&mut storage, "create State").unwrap().unwrap();
        let shown = run(&mut storage, &format!("show State \"{id}\"")).unwrap().unwrap();
        assert!(shown.starts_with(&format!("[State] ({id})")));
    }

    #[test]
    fn all_with_and_without_kind() {
        let mut storage = storage();
        assert_eq!(run(&mut storage, "all").unwrap().unwrap(), "[]");
        run(&mut storage, "create User").unwrap();
        run(&mut storage, "create City").unwrap();
        let all = run(&mut storage, "all").unwrap().unwrap();
        assert!(all.starts_with("[[User] ("));
        assert!(all.contains("), [City] ("));
        let cities = run(&mut storage, "all City").unwrap().unwrap();
        assert!(cities.starts_with("[[City] (") && !cities.contains("[User]"));
        assert_eq!(run(&mut storage, "all Ghost").unwrap_err(), Diagnostic::ClassDoesNotExist);
    }

    #[test]
    fn count_needs_a_kind() {
        let mut storage = storage();
        run(&mut storage, "create Review").unwrap();
        assert_eq!(run(&mut storage, "count").unwrap_err(), Diagnostic::ClassNameMissing);
        assert_eq!(run(&mut storage, "count Review").unwrap().unwrap(), "1");
        assert_eq!(run(&mut storage, "count User").unwrap().unwrap(), "0");
    }

    #[test]
    fn destroy_then_show_reports_missing() {
        let mut storage = storage();
        let id = run(&mut storage, "create Amenity").unwrap().unwrap();
        assert_eq!(run(&mut storage, &format!("destroy Amenity {id}")).unwrap(), None);
        assert_eq!(
            run(&mut storage, &format!("show Amenity {id}")).unwrap_err(),
            Diagnostic::NoInstanceFound
        );
        assert_eq!(
            run(&mut storage, &format!("destroy Amenity {id}")).unwrap_err(),
            Diagnostic::NoInstanceFound
        );
    }

    #[test]
    fn update_argument_checks() {
        let mut storage = storage();
        let id = run(&mut storage, "create User").unwrap().unwrap();
        assert_eq!(run(&mut storage, "update").unwrap_err(), Diagnostic::ClassNameMissing);
        assert_eq!(run(&mut storage, "update Ghost").unwrap_err(), Diagnostic::ClassDoesNotExist);
        assert_eq!(run(&mut storage, "update User").unwrap_err(), Diagnostic::InstanceIdMissing);
        assert_eq!(run(&mut storage, "update User nope").unwrap_err(), Diagnostic::NoInstanceFound);
        assert_eq!(
            run(&mut storage, &format!("update User {id}")).unwrap_err(),
            Diagnostic::AttributeNameMissing
        );
        assert_eq!(
            run(&mut storage, &format!("update User {id} first_name")).unwrap_err(),
            Diagnostic::ValueMissing
        );
    }

    #[test]
    fn update_sets_coerced_values() {
        let mut storage = storage();
        let id = run(&mut storage, "create Place").unwrap().unwrap();
        run(&mut storage, &format!("update Place {id} max_guest 4")).unwrap();
        run(&mut storage, &format!("update Place {id} name \"Cozy loft\"")).unwrap();
        run(&mut storage, &format!("update Place {id} {{\"latitude\": 1.5, \"view\": \"sea\"}}"))
            .unwrap();
        let place = storage.get(RecordKind::Place, &id).unwrap();
        assert_eq!(place.attribute("max_guest"), Some(json!(4)));
        assert_eq!(place.attribute("name"), Some(json!("Cozy loft")));
        assert_eq!(place.attribute("latitude"), Some(json!(1.5)));
        assert_eq!(place.attribute("view"), Some(json!("sea")));
    }

    #[test]
    fn update_rejects_reserved_and_ill_typed() {
        let mut storage = storage();
        let id = run(&mut storage, "create Place").unwrap().unwrap();
        assert_eq!(
            run(&mut storage, &format!("update Place {id} id other")).unwrap_err(),
            Diagnostic::AttributeReadOnly
        );
        assert_eq!(
            run(&mut storage, &format!("update Place {id} max_guest lots")).unwrap_err(),
            Diagnostic::InvalidValue
        );
        assert_eq!(
            run(&mut storage, &format!("update Place {id} {{oops")).unwrap_err(),
            Diagnostic::InvalidDictionary
        );
    }

    #[test]
    fn help_listing_and_topics() {
        let mut storage = storage();
        let listing = run(&mut storage, "help").unwrap().unwrap();
        assert!(listing.starts_with("Documented commands (type help <topic>):\n===="));
        assert!(listing.ends_with("EOF  all  count  create  destroy  help  quit  show  update"));
        assert!(run(&mut storage, "help update").unwrap().unwrap().contains("Usage: update"));
        assert_eq!(
            run(&mut storage, "help fly").unwrap_err().to_string(),
            "*** No help on fly"
        );
    }
}
