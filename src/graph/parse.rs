//! Makefile parsing
//!
//! Turns raw makefile lines into a [`TaskGraph`]. No I/O happens here; see
//! [`crate::graph::load`] for reading files from disk.

use crate::error::{FormatError, FormatResult};
use crate::graph::types::{TaskGraph, TaskName, TaskRecord};

/// Parse a whole makefile held in memory
pub fn parse_str(text: &str) -> FormatResult<TaskGraph> {
    let lines: Vec<&str> = text.lines().collect();
    parse_lines(&lines)
}

/// Parse makefile lines into a task graph
///
/// Headers start at column 0 and have the shape `name` or
/// `name: dep1 dep2 ...`. Lines starting with a space or tab are actions of
/// the most recent header. Blank lines are rejected anywhere.
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> FormatResult<TaskGraph> {
    let mut graph = TaskGraph::default();
    let mut current: Option<TaskRecord> = None;

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();

        if line.trim().is_empty() {
            return Err(FormatError::BlankLine { line: index });
        }

        if is_indented(line) {
            match current.as_mut() {
                Some(record) => record.actions.push(line.to_string()),
                None => return Err(FormatError::IndentedHeader { line: index }),
            }
            continue;
        }

        if let Some(record) = current.take() {
            graph.insert(record)?;
        }
        let record = parse_header(line, index)?;
        graph.ensure_undeclared(&record)?;
        current = Some(record);
    }

    if let Some(record) = current {
        graph.insert(record)?;
    }

    Ok(graph)
}

/// Action lines are the ones starting with a space or tab
fn is_indented(line: &str) -> bool {
    line.starts_with([' ', '\t'])
}

/// Parse a single header line
fn parse_header(line: &str, index: usize) -> FormatResult<TaskRecord> {
    // vertical tab, form feed, NBSP and friends are not action indentation
    if line.starts_with(char::is_whitespace) {
        return Err(FormatError::IndentedHeader { line: index });
    }

    let (token, tail) = match line.find(char::is_whitespace) {
        Some(pos) => (&line[..pos], Some(&line[pos..])),
        None => (line, None),
    };

    // `Some` as soon as anything follows the name token, even only whitespace
    let dependencies: Option<Vec<TaskName>> =
        tail.map(|tail| tail.split_whitespace().map(str::to_string).collect());

    let (name, dependency_list) = match token.strip_suffix(':') {
        Some(name) => match dependencies {
            Some(deps) => (name, Some(deps)),
            None => {
                return Err(FormatError::ColonWithoutDependencies {
                    line: index,
                    name: name.to_string(),
                })
            }
        },
        None => match dependencies {
            Some(deps) if !deps.is_empty() => {
                return Err(FormatError::DependenciesWithoutColon {
                    line: index,
                    name: token.to_string(),
                })
            }
            // trailing whitespace after a bare name is ignored
            _ => (token, None),
        },
    };

    if name.is_empty() {
        return Err(FormatError::EmptyTaskName { line: index });
    }

    let mut record = TaskRecord::new(name, index);
    record.dependency_list = dependency_list;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_makefile() {
        let text = "taskA: taskB taskC\n  echo \"building A\"\n  echo \"done A\"\ntaskB: \n  echo \"building B\"\ntaskC\n";
        let graph = parse_str(text).unwrap();

        assert_eq!(graph.len(), 3);
        assert_eq!(
            graph.names().collect::<Vec<_>>(),
            vec!["taskA", "taskB", "taskC"]
        );

        let a = graph.get("taskA").unwrap();
        assert_eq!(a.dependencies(), &["taskB", "taskC"]);
        assert_eq!(
            a.actions,
            vec!["  echo \"building A\"", "  echo \"done A\""]
        );
        assert_eq!(a.line, 0);

        let b = graph.get("taskB").unwrap();
        assert!(b.has_dependency_list());
        assert!(b.dependencies().is_empty());
        assert_eq!(b.line, 3);

        let c = graph.get("taskC").unwrap();
        assert!(!c.has_dependency_list());
        assert!(c.actions.is_empty());
    }

    #[test]
    fn test_actions_keep_tabs_and_indentation() {
        let graph = parse_lines(&["a", "\tone", "    two", " \tthree"]).unwrap();
        assert_eq!(
            graph.get("a").unwrap().actions,
            vec!["\tone", "    two", " \tthree"]
        );
    }

    #[test]
    fn test_dependencies_separated_by_any_whitespace() {
        let graph = parse_lines(&["a:\tb   c", "b", "c"]).unwrap();
        assert_eq!(graph.get("a").unwrap().dependencies(), &["b", "c"]);
    }

    #[test]
    fn test_crlf_input() {
        let graph = parse_str("a: b\r\n  doA\r\nb\r\n").unwrap();
        assert_eq!(graph.get("a").unwrap().actions, vec!["  doA"]);
        assert!(graph.contains("b"));
    }

    #[test]
    fn test_empty_input() {
        let graph = parse_str("").unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_blank_line_rejected() {
        assert_eq!(
            parse_lines(&["a", "", "b"]),
            Err(FormatError::BlankLine { line: 1 })
        );
        assert_eq!(
            parse_lines(&["a", "  doA", " \t "]),
            Err(FormatError::BlankLine { line: 2 })
        );
    }

    #[test]
    fn test_stray_action_rejected() {
        assert_eq!(
            parse_lines(&["  stray", "a"]),
            Err(FormatError::IndentedHeader { line: 0 })
        );
    }

    #[test]
    fn test_colon_without_dependencies() {
        assert_eq!(
            parse_lines(&["a", "b:"]),
            Err(FormatError::ColonWithoutDependencies {
                line: 1,
                name: "b".to_string(),
            })
        );
    }

    #[test]
    fn test_dependencies_without_colon() {
        assert_eq!(
            parse_lines(&["a b c"]),
            Err(FormatError::DependenciesWithoutColon {
                line: 0,
                name: "a".to_string(),
            })
        );
    }

    #[test]
    fn test_trailing_whitespace_after_bare_name() {
        let graph = parse_lines(&["a  "]).unwrap();
        assert!(!graph.get("a").unwrap().has_dependency_list());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(
            parse_lines(&[": b"]),
            Err(FormatError::EmptyTaskName { line: 0 })
        );
        assert_eq!(
            parse_lines(&[":"]),
            Err(FormatError::ColonWithoutDependencies {
                line: 0,
                name: String::new(),
            })
        );
    }

    #[test]
    fn test_duplicate_task_rejected() {
        let result = parse_lines(&["a", "  one", "b", "a: b"]);
        assert_eq!(
            result,
            Err(FormatError::DuplicateTask {
                line: 3,
                name: "a".to_string(),
                first_line: 0,
            })
        );
    }

    #[test]
    fn test_duplicate_reported_before_later_errors() {
        assert_eq!(
            parse_lines(&["a", "a", ""]),
            Err(FormatError::DuplicateTask {
                line: 1,
                name: "a".to_string(),
                first_line: 0,
            })
        );
        assert_eq!(
            parse_lines(&["a", "  doA", "b", "a: b", "  stray", ""]),
            Err(FormatError::DuplicateTask {
                line: 3,
                name: "a".to_string(),
                first_line: 0,
            })
        );
    }

    #[test]
    fn test_header_with_other_leading_whitespace() {
        assert_eq!(
            parse_lines(&["\u{b}a"]),
            Err(FormatError::IndentedHeader { line: 0 })
        );
        assert_eq!(
            parse_lines(&["b", "\u{c}a: b"]),
            Err(FormatError::IndentedHeader { line: 1 })
        );
        assert_eq!(
            parse_lines(&["\u{a0}a"]),
            Err(FormatError::IndentedHeader { line: 0 })
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "a: b c\n  doA\nb: c\n  doB\nc\n";
        assert_eq!(parse_str(text).unwrap(), parse_str(text).unwrap());
    }
}
