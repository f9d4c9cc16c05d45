/*
 * optlight プレイグラウンド - レッスンページ
 *
 * オプショナルのレッスンを1ページずつ実行し、結果を出力先に書き出します。
 * 各ページは optlight-core の機能だけを使って書かれています。
 */

use std::io::{self, Write};
use std::ops::ControlFlow;

use anyhow::{anyhow, Result};
use colored::Colorize;
use log::{debug, warn};
use optlight_core::core::{bind_or_early_return, parse, Chain, LateInit, Optional};
use optlight_core::{guard_present, Absent, Present};

use crate::config::{LessonConfig, PlaygroundConfig};

/// ページを実行する関数
pub type PageFn = fn(&LessonConfig, &mut dyn Write) -> io::Result<()>;

/// レッスンページ
pub struct Page {
    /// コマンドラインで指定する名前
    pub id: &'static str,
    /// 見出し
    pub title: &'static str,
    /// このページが扱う機能
    pub feature: &'static str,
    /// 本文
    pub run: PageFn,
}

/// 実行順に並べたレッスンページ
pub static PAGES: &[Page] = &[
    Page {
        id: "basic",
        title: "Basic Example",
        feature: "optional_binding",
        run: basic,
    },
    Page {
        id: "forced-unwrap",
        title: "Forced Unwrap",
        feature: "force_unwrap",
        run: forced_unwrap,
    },
    Page {
        id: "nil-coalescing",
        title: "Nil Coalescing Operator",
        feature: "nil_coalescing",
        run: nil_coalescing,
    },
    Page {
        id: "guard",
        title: "Optional Binding With Guard",
        feature: "guard_binding",
        run: guard,
    },
    Page {
        id: "chaining",
        title: "Optional Chaining",
        feature: "optional_chaining",
        run: chaining,
    },
    Page {
        id: "late-init",
        title: "Implicitly Unwrapped",
        feature: "late_init",
        run: late_init,
    },
    Page {
        id: "exercise",
        title: "Do: Square It",
        feature: "guard_binding",
        run: exercise,
    },
];

/// 名前からページを探す
pub fn find_page(id: &str) -> Optional<&'static Page> {
    PAGES.iter().find(|page| page.id == id).into()
}

/// ページを1つ実行する
pub fn run_page(page: &Page, config: &PlaygroundConfig, out: &mut dyn Write) -> Result<()> {
    debug!("ページ '{}' を実行します", page.id);
    let heading = format!("## {}", page.title);
    if config.general.color {
        writeln!(out, "{}", heading.bold().cyan())?;
    } else {
        writeln!(out, "{}", heading)?;
    }
    (page.run)(&config.lesson, out)?;
    writeln!(out)?;
    Ok(())
}

/// 名前で指定したページを順に実行する
///
/// 存在しない名前が含まれていれば、何も実行せずにエラーを返します。
pub fn run_pages<S: AsRef<str>>(
    ids: &[S],
    config: &PlaygroundConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let mut pages = Vec::with_capacity(ids.len());
    for id in ids {
        let id = id.as_ref();
        let page = find_page(id).ok_or_else(|| anyhow!("ページ '{}' は存在しません", id))?;
        pages.push(page);
    }
    for page in pages {
        run_page(page, config, out)?;
    }
    Ok(())
}

/// 演習：値が存在すれば2乗し、存在しなければ -1 を返す
///
/// 2乗が `i64` に収まらない場合はエラーを返します。
pub fn square_or_negative_one(number: Optional<i64>) -> Result<i64> {
    let number = guard_present!(number, else { return Ok(-1); });
    match number.checked_mul(number) {
        Some(square) => Ok(square),
        None => {
            warn!("{} の2乗は i64 の範囲を超えます", number);
            Err(anyhow!("{} の2乗はオーバーフローします", number))
        }
    }
}

/// 猫の名前を返す。名前が存在しなければその旨を返す
pub fn is_cat_name(cat_name: Optional<&str>) -> String {
    let cat_name = match bind_or_early_return(cat_name, || "Cat name was nil!".to_string()) {
        ControlFlow::Continue(name) => name,
        ControlFlow::Break(early) => return early,
    };
    cat_name.to_string()
}

fn basic(lesson: &LessonConfig, out: &mut dyn Write) -> io::Result<()> {
    let result = parse::<i64>(&lesson.number_text);
    writeln!(out, "parse({:?}) = {}", lesson.number_text, result)
}

fn forced_unwrap(lesson: &LessonConfig, out: &mut dyn Write) -> io::Result<()> {
    let value_must_be_there = Optional::present(lesson.forced_value);
    writeln!(out, "force_unwrap = {}", value_must_be_there.force_unwrap())?;

    let missing: Optional<i64> = Absent;
    match missing.try_unwrap("value_must_be_there") {
        Ok(value) => writeln!(out, "try_unwrap = {}", value),
        Err(err) => writeln!(out, "try_unwrap: {}", err),
    }
}

fn nil_coalescing(lesson: &LessonConfig, out: &mut dyn Write) -> io::Result<()> {
    let name: Optional<&str> = Absent;
    let result1 = if name.is_present() {
        name.force_unwrap()
    } else {
        "Fast Freddy"
    };
    let result7 = name.unwrap_or(&lesson.fallback_name);
    writeln!(out, "result1 = {}", result1)?;
    writeln!(out, "result7 = {}", result7)?;

    let age: Optional<u32> = Absent;
    let result3 = age.or(Present(30));
    let result4 = age.unwrap_or(lesson.fallback_age);
    writeln!(out, "result3 = {}", result3)?;
    writeln!(out, "result4 = {}", result4)
}

fn guard(_lesson: &LessonConfig, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "is_cat_name(nil) = {}", is_cat_name(Absent))?;
    writeln!(out, "is_cat_name(\"Tom\") = {}", is_cat_name(Present("Tom")))
}

#[derive(Debug, Clone)]
struct Address {
    street: String,
}

#[derive(Debug, Clone)]
struct Residence {
    rooms: u32,
    address: Optional<Address>,
}

#[derive(Debug, Clone)]
struct Person {
    name: String,
    residence: Optional<Residence>,
}

fn street_of(person: &Optional<Person>) -> Optional<String> {
    Chain::new(person.as_ref())
        .then(|p| p.residence.as_ref())
        .then(|r| r.address.as_ref())
        .map(|a| a.street.clone())
        .resolve()
}

fn chaining(_lesson: &LessonConfig, out: &mut dyn Write) -> io::Result<()> {
    let mut john = Present(Person {
        name: "John".to_string(),
        residence: Absent,
    });
    writeln!(out, "street = {}", street_of(&john))?;

    let written = john
        .chain_mut()
        .then(|p| p.residence.as_mut())
        .then(|r| r.address.as_mut())
        .field(|a| &mut a.street)
        .assign("Acacia Road".to_string());
    writeln!(out, "assign without residence = {}", describe_outcome(written))?;

    john.chain_mut()
        .field(|p| &mut p.residence)
        .assign(Present(Residence {
            rooms: 3,
            address: Absent,
        }));
    let written = john
        .chain_mut()
        .then(|p| p.residence.as_mut())
        .field(|r| &mut r.address)
        .assign(Present(Address {
            street: "Acacia Road".to_string(),
        }));
    writeln!(out, "assign with residence = {}", describe_outcome(written))?;

    let rooms = Chain::new(john.as_ref())
        .then(|p| p.residence.as_ref())
        .map(|r| r.rooms)
        .resolve();
    let name = john.as_ref().map(|p| p.name.as_str()).unwrap_or("nobody");
    writeln!(out, "{} street = {}, rooms = {}", name, street_of(&john), rooms)
}

fn describe_outcome(outcome: Optional<()>) -> &'static str {
    if outcome.is_present() {
        "success"
    } else {
        "nil"
    }
}

fn late_init(_lesson: &LessonConfig, out: &mut dyn Write) -> io::Result<()> {
    let mut completion_handler: LateInit<Box<dyn Fn(&str) -> String>> =
        LateInit::new("completion_handler");
    writeln!(out, "initialized = {}", completion_handler.is_initialized())?;

    completion_handler.set(Box::new(|text: &str| format!("tapped: {}", text)));
    writeln!(out, "{}", (completion_handler.get())("fake button"))
}

fn exercise(lesson: &LessonConfig, out: &mut dyn Write) -> io::Result<()> {
    let input = lesson.exercise_input;
    match square_or_negative_one(Present(input)) {
        Ok(square) => writeln!(out, "square({}) = {}", input, square)?,
        Err(err) => writeln!(out, "square({}): {}", input, err)?,
    }
    writeln!(out, "square(nil) = {}", square_or_negative_one(Absent).unwrap_or(-1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_config() -> PlaygroundConfig {
        let mut config = PlaygroundConfig::default();
        config.general.color = false;
        config
    }

    fn render(id: &str) -> String {
        let mut out = Vec::<u8>::new();
        run_pages(&[id], &plain_config(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_pages_are_well_formed() {
        for (i, page) in PAGES.iter().enumerate() {
            assert!(optlight_core::has_feature(page.feature), "未知の機能: {}", page.feature);
            assert!(PAGES[i + 1..].iter().all(|other| other.id != page.id));
        }
    }

    #[test]
    fn test_find_page() {
        assert!(find_page("guard").is_present());
        assert!(find_page("closures").is_absent());
    }

    #[test]
    fn test_basic_page() {
        let output = render("basic");
        assert!(output.starts_with("## Basic Example"));
        assert!(output.contains("parse(\"45\") = Optional(45)"));
    }

    #[test]
    fn test_forced_unwrap_page() {
        let output = render("forced-unwrap");
        assert!(output.contains("force_unwrap = 12"));
        assert!(output.contains("try_unwrap: 値が存在しません: value_must_be_there"));
    }

    #[test]
    fn test_nil_coalescing_page() {
        let output = render("nil-coalescing");
        assert!(output.contains("result1 = Fast Freddy"));
        assert!(output.contains("result7 = Slow Freddy"));
        assert!(output.contains("result3 = Optional(30)"));
        assert!(output.contains("result4 = 40"));
    }

    #[test]
    fn test_chaining_page() {
        let output = render("chaining");
        assert!(output.contains("street = nil"));
        assert!(output.contains("assign without residence = nil"));
        assert!(output.contains("assign with residence = success"));
        assert!(output.contains("John street = Optional(Acacia Road), rooms = Optional(3)"));
    }

    #[test]
    fn test_late_init_page() {
        let output = render("late-init");
        assert!(output.contains("initialized = false"));
        assert!(output.contains("tapped: fake button"));
    }

    #[test]
    fn test_unknown_page_runs_nothing() {
        let mut out = Vec::<u8>::new();
        let err = run_pages(&["basic", "closures"], &plain_config(), &mut out).unwrap_err();
        assert!(err.to_string().contains("closures"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_exercise() {
        assert_eq!(square_or_negative_one(Present(7)).unwrap(), 49);
        assert_eq!(square_or_negative_one(Present(-3)).unwrap(), 9);
        assert_eq!(square_or_negative_one(Absent).unwrap(), -1);
        assert!(render("exercise").contains("square(7) = 49"));
    }

    #[test]
    fn test_exercise_overflow() {
        let err = square_or_negative_one(Present(i64::MAX)).unwrap_err();
        assert!(err.to_string().contains("オーバーフロー"));
        assert!(square_or_negative_one(Present(3_037_000_499)).is_ok());
        assert!(square_or_negative_one(Present(3_037_000_500)).is_err());

        let mut config = plain_config();
        config.lesson.exercise_input = 9_999_999_999;
        let mut out = Vec::<u8>::new();
        run_pages(&["exercise"], &config, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("square(9999999999): 9999999999 の2乗はオーバーフローします"));
        assert!(output.contains("square(nil) = -1"));
    }

    #[test]
    fn test_is_cat_name() {
        assert_eq!(is_cat_name(Absent), "Cat name was nil!");
        assert_eq!(is_cat_name(Present("Tom")), "Tom");
    }
}
