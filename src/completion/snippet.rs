//! Insert text for each category, in LSP snippet syntax.
//!
//! | Category | Name | Inserted |
//! |----------|------|----------|
//! | command | `message` | `message(${1})` |
//! | command | `if` | `if(${1})` ... `endif(${1})` |
//! | variable | `CMAKE_<LANG>_COMPILER` | `CMAKE_${1:<LANG>}_COMPILER` |
//! | module | `FindZLIB` | `find_package(ZLIB${1: REQUIRED})` |
//! | module | `GNUInstallDirs` | `include(GNUInstallDirs)` |

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::category::Category;

/// Commands that open a block closed by `end<name>()`.
const BLOCK_COMMANDS: &[&str] = &["if", "function", "while", "macro", "foreach"];

pub fn insert_text(category: Category, name: &str) -> String {
    match category {
        Category::Command => command(name),
        Category::Variable | Category::Property => placeholders(name),
        Category::Module => module(name),
    }
}

fn command(name: &str) -> String {
    if BLOCK_COMMANDS.contains(&name) {
        format!("{name}(${{1}})\n\t\nend{name}(${{1}})\n")
    } else {
        format!("{name}(${{1}})")
    }
}

/// Every `<...>` segment becomes a numbered placeholder whose default is the
/// segment itself, brackets included.
fn placeholders(name: &str) -> String {
    static ANGLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<>]*>").unwrap());

    let mut index = 0;
    ANGLE
        .replace_all(name, |captures: &Captures| {
            index += 1;
            format!("${{{index}:{}}}", &captures[0])
        })
        .into_owned()
}

fn module(name: &str) -> String {
    match name.strip_prefix("Find") {
        Some(package) => format!("find_package({package}${{1: REQUIRED}})"),
        None => format!("include({name})"),
    }
}
