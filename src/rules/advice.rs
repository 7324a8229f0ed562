// SPDX-License-Identifier: PMPL-1.0-or-later
//! Advice: best-practice checks that are not strict errors.
//!
//! - Insecure `http://` URLs on links, embeds and media
//! - `<th scope>` limited to `col`/`row`
//! - Placeholders standing in for labels
//! - Duplicate landmark roles and duplicate visible `<main>`
//! - `tel:`/`fax:`/`modem:` and `mailto:` link validity
//! - `<figcaption>` position, empty `id`/`class`, required `<select>` placeholder option

use super::{is_labelled, label_targets, Offender, Rule, UNLABELED_INPUT_TYPES};
use crate::dom::Document;
use crate::validators;

/// Attributes that hold a fetched or navigated URL, and the elements they apply to.
const URL_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("href", &["a", "area", "link", "base"]),
    (
        "src",
        &["img", "iframe", "embed", "script", "source", "video", "audio", "track", "input", "frame"],
    ),
    ("data", &["object"]),
    ("poster", &["video"]),
    ("action", &["form"]),
    ("formaction", &["button", "input"]),
];

/// Landmark roles that may appear only once per page.
const UNIQUE_LANDMARKS: &[&str] = &["main", "search", "banner", "contentinfo"];

rule!(Advice, NO_INSECURE_URLS, "no-insecure-urls",
    "Links, embeds and media should not load over plain HTTP",
    "use insecure HTTP URLs", no_insecure_urls);
rule!(Advice, TH_SCOPE_IS_VALID, "th-scope-is-valid",
    "A scope attribute on <th> must be \"col\" or \"row\"",
    "have an invalid scope attribute", th_scope_is_valid);
rule!(Advice, NO_PLACEHOLDER_AS_LABEL, "no-placeholder-as-label",
    "Placeholder text must not be the only label of a field",
    "use their placeholder as the only label", no_placeholder_as_label);
rule!(Advice, UNIQUE_LANDMARK_ROLES, "unique-landmark-roles",
    "The main, search, banner and contentinfo landmarks should appear at most once",
    "repeat a landmark role that should be unique", unique_landmark_roles);
rule!(Advice, NO_BUTTON_ROLE_ON_LINKS, "no-button-role-on-links",
    "Links should not be given role=\"button\"; use <button>",
    "are links with role=\"button\"", no_button_role_on_links);
rule!(Advice, PHONE_LINKS_ARE_VALID, "phone-links-are-valid",
    "tel:, fax: and modem: links must contain a dialable number",
    "link to invalid phone numbers", phone_links_are_valid);
rule!(Advice, MAILTO_LINKS_ARE_VALID, "mailto-links-are-valid",
    "mailto: links must contain well-formed email addresses",
    "link to invalid email addresses", mailto_links_are_valid);
rule!(Advice, FIGCAPTION_POSITION, "figcaption-position",
    "A <figcaption> must be the first or last child, and a <figure> may hold only one",
    "are misplaced or duplicated <figcaption> elements", figcaption_position);
rule!(Advice, SINGLE_VISIBLE_MAIN, "single-visible-main",
    "A page should have at most one visible <main>",
    "are extra visible <main> elements", single_visible_main);
rule!(Advice, NO_EMPTY_ID_OR_CLASS, "no-empty-id-or-class",
    "id and class attributes should not be present but empty",
    "have an empty id or class attribute", no_empty_id_or_class);
rule!(Advice, REQUIRED_SELECT_HAS_EMPTY_FIRST_OPTION, "required-select-has-empty-first-option",
    "A required <select> should start with an empty-value <option>",
    "are required selects without an empty first <option>", required_select_has_empty_first_option);

/// Advice catalog.
pub static RULES: &[Rule] = &[
    NO_INSECURE_URLS,
    TH_SCOPE_IS_VALID,
    NO_PLACEHOLDER_AS_LABEL,
    UNIQUE_LANDMARK_ROLES,
    NO_BUTTON_ROLE_ON_LINKS,
    PHONE_LINKS_ARE_VALID,
    MAILTO_LINKS_ARE_VALID,
    FIGCAPTION_POSITION,
    SINGLE_VISIBLE_MAIN,
    NO_EMPTY_ID_OR_CLASS,
    REQUIRED_SELECT_HAS_EMPTY_FIRST_OPTION,
];

fn no_insecure_urls(doc: &Document) -> Vec<Offender> {
    doc.elements()
        .filter_map(|el| {
            URL_ATTRIBUTES
                .iter()
                .filter(|(_, tags)| el.is(tags))
                .find_map(|(attr, _)| {
                    el.attr(attr)
                        .filter(|v| validators::is_insecure_url(v))
                        .map(|v| (*attr, v))
                })
                .map(|(attr, value)| {
                    Offender::at(
                        el,
                        format!(
                            "uses insecure HTTP protocol in its {} attribute: \"{}\". Use HTTPS instead.",
                            attr, value
                        ),
                    )
                })
        })
        .collect()
}

fn th_scope_is_valid(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["th"])
        .filter_map(|th| {
            let scope = th.attr("scope")?;
            if scope.trim().is_empty() {
                return Some(Offender::at(
                    th,
                    "has an empty scope attribute; use scope=\"col\" or scope=\"row\".",
                ));
            }
            let normalized = scope.trim().to_ascii_lowercase();
            if normalized == "col" || normalized == "row" {
                None
            } else {
                Some(Offender::at(
                    th,
                    format!("has an invalid scope=\"{}\"; use scope=\"col\" or scope=\"row\".", scope),
                ))
            }
        })
        .collect()
}

fn no_placeholder_as_label(doc: &Document) -> Vec<Offender> {
    let targets = label_targets(doc);
    doc.elements_by_tag(&["input", "textarea"])
        .filter(|el| el.name() == "textarea" || !UNLABELED_INPUT_TYPES.contains(&el.input_type().as_str()))
        .filter(|el| el.has_non_empty_attr("placeholder"))
        .filter(|el| !is_labelled(el, &targets))
        .map(|el| {
            Offender::at(
                el,
                format!(
                    "uses its placeholder \"{}\" as its only label. Placeholders disappear while typing; add a <label>.",
                    el.attr("placeholder").unwrap_or_default().trim()
                ),
            )
        })
        .collect()
}

fn unique_landmark_roles(doc: &Document) -> Vec<Offender> {
    let mut offenders = Vec::new();
    for role in UNIQUE_LANDMARKS {
        let visible = doc
            .elements_with_role(role)
            .filter(|el| !el.is_hidden() && !el.ancestors().any(|a| a.is_hidden()));
        for el in visible.skip(1) {
            offenders.push(Offender::at(
                el,
                format!("repeats the \"{}\" landmark role; a page should have only one.", role),
            ));
        }
    }
    offenders.sort_by_key(|o| o.node);
    offenders
}

fn no_button_role_on_links(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["a"])
        .filter(|a| a.has_role("button"))
        .map(|a| {
            Offender::at(
                a,
                "has role=\"button\". Use a <button> element for actions and keep links for navigation.",
            )
        })
        .collect()
}

fn phone_links_are_valid(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["a", "area"])
        .filter_map(|el| {
            let href = el.attr("href")?;
            let number = validators::phone_number_from_uri(href)?;
            if validators::is_valid_phone_number(number) {
                None
            } else {
                Some(Offender::at(
                    el,
                    format!(
                        "links to an invalid phone number \"{}\". Use at least {} digits and no letters.",
                        href.trim(),
                        validators::MIN_PHONE_DIGITS
                    ),
                ))
            }
        })
        .collect()
}

fn mailto_links_are_valid(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["a", "area"])
        .filter_map(|el| {
            let addresses = validators::mailto_addresses(el.attr("href")?)?;
            if addresses.iter().all(|a| a.is_empty()) {
                return Some(Offender::at(el, "has a mailto: link without an email address."));
            }
            addresses
                .iter()
                .find(|a| !validators::is_valid_email(a))
                .map(|bad| {
                    Offender::at(el, format!("links to an invalid email address \"{}\".", bad))
                })
        })
        .collect()
}

fn figcaption_position(doc: &Document) -> Vec<Offender> {
    let mut offenders = Vec::new();
    for caption in doc.elements_by_tag(&["figcaption"]) {
        if !caption.is_first_significant_child() && !caption.is_last_significant_child() {
            offenders.push(Offender::at(
                caption,
                "must be the first or last child of its parent.",
            ));
        }
    }
    for figure in doc.elements_by_tag(&["figure"]) {
        for extra in figure.children().filter(|c| c.name() == "figcaption").skip(1) {
            offenders.push(Offender::at(
                extra,
                "is an extra <figcaption>; a <figure> may contain only one.",
            ));
        }
    }
    offenders.sort_by_key(|o| o.node);
    offenders.dedup_by_key(|o| o.node);
    offenders
}

fn single_visible_main(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["main"])
        .filter(|main| !main.has_attr("hidden"))
        .skip(1)
        .map(|main| {
            Offender::at(
                main,
                "is an additional visible <main>; hide the others with the hidden attribute.",
            )
        })
        .collect()
}

fn no_empty_id_or_class(doc: &Document) -> Vec<Offender> {
    doc.elements()
        .filter_map(|el| {
            ["id", "class"]
                .into_iter()
                .find(|attr| el.has_blank_attr(attr))
                .map(|attr| Offender::at(el, format!("has an empty {} attribute.", attr)))
        })
        .collect()
}

fn required_select_has_empty_first_option(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["select"])
        .filter(|select| select.has_attr("required") && !select.has_attr("multiple"))
        .filter(|select| {
            select
                .attr("size")
                .and_then(|s| s.trim().parse::<u32>().ok())
                .map_or(true, |size| size <= 1)
        })
        .filter(|select| {
            let first = select.descendants_by_tag(&["option"]).next();
            match first {
                None => true,
                Some(option) => {
                    let value = match option.attr("value") {
                        Some(v) => v.to_string(),
                        None => option.text_content(),
                    };
                    !value.trim().is_empty()
                }
            }
        })
        .map(|select| {
            Offender::at(
                select,
                "is required and should start with an empty <option> (value=\"\") as its placeholder.",
            )
        })
        .collect()
}
