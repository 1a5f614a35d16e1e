use course_timetable::{
    DatabaseConfig, TimetableConfig, TimetableError, TimetableManager, WEEKDAYS,
    export_timetable_to_csv, export_timetable_to_json, logging, open_store, render, today,
};
use std::io::{self, BufRead, Write};

enum Flow {
    Continue,
    Quit,
}

/// Whitespace-separated arguments; double quotes group words with spaces.
fn split_args(line: &str) -> Result<Vec<String>, String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;
    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if in_quotes {
        return Err("unterminated quote".to_string());
    }
    if has_token {
        args.push(current);
    }
    Ok(args)
}

fn parse_period(raw: &str) -> Result<i32, String> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| format!("Invalid period '{raw}'"))
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "entry" } else { "entries" }
}

fn print_help() {
    println!(
        "Commands:\n  help                                   Show this help\n  courses                                List courses\n  days                                   List weekdays\n  add-course <name>                      Create a course\n  add <course> <day> <period> <subject> <teacher> <classroom>\n                                         Add a timetable entry\n  update <course> <day> <period> <subject> <teacher> <classroom>\n                                         Rewrite subject/teacher/classroom of a slot\n  delete <course> <day> <period>         Delete every entry in a slot\n  show <course> [day]                    Show a day's timetable (default: today)\n  all                                    Show every timetable entry\n  export <csv|json> <path>               Write every entry to disk\n  quit|exit                              Exit\nQuote arguments containing spaces, e.g. \"Room 5\"."
    );
}

fn run_command(manager: &TimetableManager, args: &[String]) -> anyhow::Result<Flow> {
    let argv: Vec<&str> = args.iter().map(String::as_str).collect();
    match argv.as_slice() {
        ["help"] => print_help(),
        ["quit"] | ["exit"] => return Ok(Flow::Quit),
        ["courses"] => {
            let courses = manager.get_all_courses()?;
            print!("{}", render::courses_table(&courses));
        }
        ["days"] => {
            for day in WEEKDAYS {
                println!("{day}");
            }
        }
        ["add-course", name] => {
            let course = manager.add_course(name)?;
            println!(
                "Added course '{}' (id {}).",
                course.course_name, course.course_id
            );
        }
        ["add", course, day, period, subject, teacher, classroom] => {
            let period = parse_period(period).map_err(anyhow::Error::msg)?;
            let entry =
                manager.add_timetable_entry(course, day, period, subject, teacher, classroom)?;
            println!("Added entry: {}", render::format_entry_line(&entry));
        }
        ["update", course, day, period, subject, teacher, classroom] => {
            let period = parse_period(period).map_err(anyhow::Error::msg)?;
            let updated = manager
                .update_timetable_entry(course, day, period, subject, teacher, classroom)?;
            println!("Updated {} {}.", updated.len(), plural(updated.len()));
        }
        ["delete", course, day, period] => {
            let period = parse_period(period).map_err(anyhow::Error::msg)?;
            let deleted = manager.delete_timetable_entry(course, day, period)?;
            println!("Deleted {} {}.", deleted.len(), plural(deleted.len()));
        }
        ["show", course] => show_timetable(manager, course, today())?,
        ["show", course, day] => show_timetable(manager, course, day)?,
        ["all"] => {
            let entries = manager.get_all_timetables()?;
            print!("{}", render::entries_table(&entries));
        }
        ["export", format, path] => {
            let courses = manager.get_all_courses()?;
            let entries = manager.get_all_timetables()?;
            let written = match *format {
                "csv" => export_timetable_to_csv(&courses, &entries, path)?,
                "json" => export_timetable_to_json(&courses, &entries, path)?,
                other => anyhow::bail!("Unknown export format '{other}' (use csv or json)"),
            };
            println!("Exported {written} {} to {path}.", plural(written));
        }
        [command, ..] => {
            println!("Unrecognized or malformed command '{command}'. Type 'help'.");
        }
        [] => {}
    }
    Ok(Flow::Continue)
}

fn show_timetable(manager: &TimetableManager, course: &str, day: &str) -> anyhow::Result<()> {
    match manager.find_timetable(course, day)? {
        None => println!("{}", TimetableError::CourseNotFound(course.to_string())),
        Some(entries) if entries.is_empty() => {
            println!("No timetable found for {course} on {day}");
        }
        Some(entries) => print!("{}", render::render_timetable(&entries)),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    logging::init_logging(logging::CLI_DEFAULT_FILTER);

    let in_memory = std::env::args().skip(1).any(|arg| arg == "--memory");
    let database = if in_memory {
        DatabaseConfig {
            in_memory: true,
            ..DatabaseConfig::default()
        }
    } else {
        TimetableConfig::from_env()?.database
    };
    let manager = TimetableManager::from_store(open_store(&database)?);

    println!("Course Timetable (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let args = match split_args(line.trim()) {
            Ok(args) => args,
            Err(err) => {
                println!("Error: {err}");
                continue;
            }
        };

        match run_command(&manager, &args) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(err) => println!("Error: {err}"),
        }
    }
    Ok(())
}
