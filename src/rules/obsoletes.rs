// SPDX-License-Identifier: PMPL-1.0-or-later
//! Obsoletes: elements and attributes removed from HTML.

use super::{is_foreign, Offender, Rule};
use crate::dom::Document;

/// Elements removed from the language.
pub const OBSOLETE_ELEMENTS: &[&str] = &[
    "acronym", "applet", "basefont", "big", "blink", "center", "dir", "font", "frame",
    "frameset", "noframes", "isindex", "keygen", "menuitem", "listing", "marquee", "multicol",
    "nextid", "nobr", "noembed", "param", "plaintext", "rb", "rtc", "spacer", "strike", "tt",
    "xmp", "bgsound",
];

/// Obsolete attributes keyed by the element they are obsolete on (`*` = any element).
pub const OBSOLETE_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("*", &["align", "bgcolor"]),
    ("table", &["cellpadding", "cellspacing", "width", "summary"]),
    ("img", &["border", "name", "hspace", "vspace"]),
    ("a", &["name", "charset"]),
    ("td", &["valign", "nowrap", "height"]),
    ("th", &["valign", "nowrap", "height"]),
    ("script", &["language"]),
    ("iframe", &["frameborder", "scrolling", "marginwidth"]),
    ("br", &["clear"]),
    ("hr", &["color", "size", "noshade"]),
    ("ul", &["compact"]),
    ("li", &["type"]),
    ("body", &["background", "alink", "link", "vlink", "text"]),
    ("meta", &["scheme"]),
];

rule!(Obsoletes, NO_OBSOLETE_ELEMENTS, "no-obsolete-elements",
    "Obsolete elements must not be used",
    "are obsolete", no_obsolete_elements);
rule!(Obsoletes, NO_OBSOLETE_ATTRIBUTES, "no-obsolete-attributes",
    "Obsolete presentational attributes must not be used",
    "use obsolete attributes", no_obsolete_attributes);

/// Obsoletes catalog.
pub static RULES: &[Rule] = &[NO_OBSOLETE_ELEMENTS, NO_OBSOLETE_ATTRIBUTES];

fn replacement(tag: &str) -> Option<&'static str> {
    match tag {
        "acronym" => Some("<abbr>"),
        "applet" => Some("<object>"),
        "strike" => Some("<del> or <s>"),
        "tt" => Some("<code>, <kbd> or <samp>"),
        "dir" => Some("<ul>"),
        "listing" | "xmp" | "plaintext" => Some("<pre> or <code>"),
        "bgsound" => Some("<audio>"),
        "keygen" => Some("the Web Crypto API"),
        "big" | "center" | "font" | "basefont" | "blink" | "marquee" | "spacer" | "nobr"
        | "multicol" => Some("CSS"),
        _ => None,
    }
}

fn no_obsolete_elements(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(OBSOLETE_ELEMENTS)
        .filter(|el| !is_foreign(el))
        .map(|el| match replacement(el.name()) {
            Some(instead) => Offender::at(el, format!("is obsolete. Use {} instead.", instead)),
            None => Offender::at(el, "is obsolete and must not be used."),
        })
        .collect()
}

fn no_obsolete_attributes(doc: &Document) -> Vec<Offender> {
    doc.elements()
        .filter(|el| !el.is(&["svg", "math"]) && !is_foreign(el))
        .filter_map(|el| {
            let used: Vec<&str> = OBSOLETE_ATTRIBUTES
                .iter()
                .filter(|(tag, _)| *tag == "*" || *tag == el.name())
                .flat_map(|(_, attrs)| attrs.iter().copied())
                .filter(|attr| el.has_attr(attr))
                .collect();
            match used.as_slice() {
                [] => None,
                [attr] => Some(Offender::at(el, format!("uses the obsolete {} attribute.", attr))),
                _ => Some(Offender::at(
                    el,
                    format!("uses the obsolete attributes {}.", used.join(", ")),
                )),
            }
        })
        .collect()
}
