// SPDX-License-Identifier: PMPL-1.0-or-later
//! Warnings: structural nesting, ordering and content problems.

use super::{is_foreign, is_labelable, Offender, Rule};
use crate::dom::{is_void_element, Child, Document, Element};
use crate::validators;

/// Inline text-level containers that must not hold a `<div>`.
const INLINE_CONTAINERS: &[&str] = &[
    "b", "i", "q", "em", "abbr", "cite", "code", "span", "small", "label", "strong",
];

/// Sectioning content.
const SECTIONING: &[&str] = &["article", "aside", "nav", "section"];

/// Content forbidden inside `<address>`.
const ADDRESS_FORBIDDEN: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "hgroup", "article", "aside", "nav", "section", "header",
    "footer", "address",
];

/// Image-like elements that should be hidden with `aria-hidden`, not `role="presentation"`.
const IMAGE_LIKE: &[&str] = &["img", "svg", "area", "embed", "canvas", "object"];

/// Non-void elements allowed to be empty.
const EMPTY_ALLOWED: &[&str] = &[
    "html", "head", "body", "iframe", "textarea", "script", "style", "template", "title",
    "tbody", "colgroup", "option", "canvas", "progress", "meter", "slot", "noscript",
];

/// Required relative order of table sections.
const TABLE_SECTIONS: &[&str] = &["caption", "colgroup", "thead", "tfoot", "tbody"];

rule!(Warnings, LI_INSIDE_LIST, "li-inside-list",
    "<li> must be a direct child of <ul>, <ol> or <menu>",
    "are list items outside a list", li_inside_list);
rule!(Warnings, DL_STRUCTURE, "dl-structure",
    "<dl> holds dt/dd groups; every <dt> is followed by a <dd>",
    "break description list structure", dl_structure);
rule!(Warnings, DT_DD_INSIDE_DL, "dt-dd-inside-dl",
    "<dt> and <dd> must be inside a <dl>",
    "are terms or descriptions outside a <dl>", dt_dd_inside_dl);
rule!(Warnings, FIGCAPTION_INSIDE_FIGURE, "figcaption-inside-figure",
    "<figcaption> must be a child of <figure>",
    "are captions outside a <figure>", figcaption_inside_figure);
rule!(Warnings, MAIN_NOT_NESTED, "main-not-nested",
    "<main> must not be inside nav, aside, footer, header or article",
    "are <main> elements nested in other landmarks", main_not_nested);
rule!(Warnings, OPTIONS_INSIDE_SELECT, "options-inside-select",
    "<option> and <optgroup> must be inside a <select>",
    "are options outside a <select>", options_inside_select);
rule!(Warnings, LEGEND_INSIDE_FIELDSET, "legend-inside-fieldset",
    "<legend> must be a child of <fieldset>",
    "are legends outside a <fieldset>", legend_inside_fieldset);
rule!(Warnings, ADDRESS_CONTENT, "address-content",
    "<address> must not contain headings, sectioning content or another <address>",
    "are not allowed inside <address>", address_content);
rule!(Warnings, NO_BLOCK_IN_INLINE, "no-block-in-inline",
    "<div> must not be nested inside inline text-level elements",
    "are block elements inside inline elements", no_block_in_inline);
rule!(Warnings, NO_REDUNDANT_SECTION_WRAPPER, "no-redundant-section-wrapper",
    "Sectioning elements must not merely wrap the content of another sectioning element",
    "are redundant sectioning wrappers", no_redundant_section_wrapper);
rule!(Warnings, LEGEND_FIRST_IN_FIELDSET, "legend-first-in-fieldset",
    "<legend> must be the first child of its <fieldset>",
    "are legends that are not first in their <fieldset>", legend_first_in_fieldset);
rule!(Warnings, SUMMARY_FIRST_IN_DETAILS, "summary-first-in-details",
    "<summary> must be the first child of its <details>",
    "are summaries that are not first in their <details>", summary_first_in_details);
rule!(Warnings, ABBR_HAS_TITLE, "abbr-has-title",
    "<abbr> needs a non-empty title",
    "are abbreviations without a title", abbr_has_title);
rule!(Warnings, ALT_NOT_FILENAME, "alt-not-filename",
    "alt text must not be a file name",
    "use a file name as alt text", alt_not_filename);
rule!(Warnings, DECORATIVE_ELEMENTS_HAVE_NO_NAME, "decorative-elements-have-no-name",
    "Decorative elements must not carry title, aria-label or aria-labelledby",
    "are decorative but carry an accessible name", decorative_elements_have_no_name);
rule!(Warnings, NO_PRESENTATION_ROLE_ON_IMAGES, "no-presentation-role-on-images",
    "Hide image-like elements with aria-hidden rather than role=\"presentation\"",
    "are images with role=\"presentation\"", no_presentation_role_on_images);
rule!(Warnings, SVG_HAS_ROLE_OR_HIDDEN, "svg-has-role-or-hidden",
    "<svg> must have role=\"img\" or aria-hidden=\"true\"",
    "are <svg> elements without role=\"img\" or aria-hidden", svg_has_role_or_hidden);
rule!(Warnings, MEDIA_NO_AUTOPLAY, "media-no-autoplay",
    "Audio and video must not autoplay",
    "are media elements that autoplay", media_no_autoplay);
rule!(Warnings, MEDIA_HAS_CONTROLS, "media-has-controls",
    "Audio and video must expose controls",
    "are media elements without controls", media_has_controls);
rule!(Warnings, NO_EMPTY_ELEMENTS, "no-empty-elements",
    "Elements must not be completely empty",
    "are empty", no_empty_elements);
rule!(Warnings, TABLES_DO_NOT_NEST, "tables-do-not-nest",
    "Tables must not be nested",
    "are nested tables", tables_do_not_nest);
rule!(Warnings, TABLE_HAS_CAPTION, "table-has-caption",
    "Data tables need a <caption> as their first child",
    "are tables without a leading <caption>", table_has_caption);
rule!(Warnings, TABLE_SECTION_ORDER, "table-section-order",
    "Table sections follow caption, colgroup, thead, tfoot, tbody",
    "are tables with sections out of order", table_section_order);
rule!(Warnings, TABLE_HAS_THEAD, "table-has-thead",
    "Tables with a <tbody> need a <thead>",
    "are tables without a <thead>", table_has_thead);
rule!(Warnings, SCRIPT_LINKS_HAVE_BUTTON_ROLE, "script-links-have-button-role",
    "Links to javascript: or # act as buttons and need role=\"button\"",
    "are script links without role=\"button\"", script_links_have_button_role);
rule!(Warnings, HEADING_ROLE_HAS_LEVEL, "heading-role-has-level",
    "role=\"heading\" needs aria-level",
    "are headings without aria-level", heading_role_has_level);
rule!(Warnings, LABELS_HAVE_SINGLE_CONTROL, "labels-have-single-control",
    "A <label> without for must wrap exactly one form control",
    "are labels that do not wrap exactly one control", labels_have_single_control);
rule!(Warnings, DIR_MATCHES_LANG, "dir-matches-lang",
    "dir=\"rtl\" must be used with a right-to-left language",
    "declare dir=\"rtl\" without a right-to-left language", dir_matches_lang);
rule!(Warnings, RTL_LANG_DECLARES_DIR, "rtl-lang-declares-dir",
    "Right-to-left languages must declare dir=\"rtl\"",
    "use a right-to-left language without dir=\"rtl\"", rtl_lang_declares_dir);
rule!(Warnings, NESTED_LANG_DECLARES_DIR, "nested-lang-declares-dir",
    "Language changes inside right-to-left content must declare their own dir",
    "change language inside right-to-left content without a dir", nested_lang_declares_dir);

/// Warnings catalog.
pub static RULES: &[Rule] = &[
    LI_INSIDE_LIST,
    DL_STRUCTURE,
    DT_DD_INSIDE_DL,
    FIGCAPTION_INSIDE_FIGURE,
    MAIN_NOT_NESTED,
    OPTIONS_INSIDE_SELECT,
    LEGEND_INSIDE_FIELDSET,
    ADDRESS_CONTENT,
    NO_BLOCK_IN_INLINE,
    NO_REDUNDANT_SECTION_WRAPPER,
    LEGEND_FIRST_IN_FIELDSET,
    SUMMARY_FIRST_IN_DETAILS,
    ABBR_HAS_TITLE,
    ALT_NOT_FILENAME,
    DECORATIVE_ELEMENTS_HAVE_NO_NAME,
    NO_PRESENTATION_ROLE_ON_IMAGES,
    SVG_HAS_ROLE_OR_HIDDEN,
    MEDIA_NO_AUTOPLAY,
    MEDIA_HAS_CONTROLS,
    NO_EMPTY_ELEMENTS,
    TABLES_DO_NOT_NEST,
    TABLE_HAS_CAPTION,
    TABLE_SECTION_ORDER,
    TABLE_HAS_THEAD,
    SCRIPT_LINKS_HAVE_BUTTON_ROLE,
    HEADING_ROLE_HAS_LEVEL,
    LABELS_HAVE_SINGLE_CONTROL,
    DIR_MATCHES_LANG,
    RTL_LANG_DECLARES_DIR,
    NESTED_LANG_DECLARES_DIR,
];

/// Flag `tags` whose direct parent is not one of `parents`.
fn require_parent(doc: &Document, tags: &[&str], parents: &[&str], detail: &str) -> Vec<Offender> {
    doc.elements_by_tag(tags)
        .filter(|el| !el.parent().is_some_and(|p| p.is(parents)))
        .map(|el| Offender::at(el, detail))
        .collect()
}

/// Flag `tags` that are not the first significant child of a `parent` they sit in.
fn require_first_in(doc: &Document, tag: &str, parent: &str) -> Vec<Offender> {
    doc.elements_by_tag(&[tag])
        .filter(|el| el.parent().is_some_and(|p| p.name() == parent))
        .filter(|el| !el.is_first_significant_child())
        .map(|el| Offender::at(el, format!("must be the first child of its <{}>.", parent)))
        .collect()
}

fn is_presentational(el: &Element<'_>) -> bool {
    el.has_role("presentation") || el.has_role("none")
}

fn li_inside_list(doc: &Document) -> Vec<Offender> {
    require_parent(doc, &["li"], &["ul", "ol", "menu"], "is not inside a <ul>, <ol> or <menu>.")
}

/// A `<dl>` itself, or a `<div>` grouping inside one.
fn is_dl_group(el: &Element<'_>) -> bool {
    el.name() == "dl" || (el.name() == "div" && el.parent().is_some_and(|p| p.name() == "dl"))
}

fn dl_structure(doc: &Document) -> Vec<Offender> {
    let mut offenders = Vec::new();
    for dl in doc.elements_by_tag(&["dl"]) {
        for child in dl.element_children() {
            if !child.is(&["dt", "dd", "div", "script", "template"]) {
                offenders.push(Offender::at(child, "is not allowed directly inside <dl>."));
            }
            if child.name() == "div" {
                for inner in child.element_children() {
                    if !inner.is(&["dt", "dd", "script", "template"]) {
                        offenders.push(Offender::at(
                            inner,
                            "is not allowed inside a <div> grouping in <dl>.",
                        ));
                    }
                }
            }
        }
    }

    for el in doc.elements_by_tag(&["dt", "dd"]) {
        if !el.parent().is_some_and(|p| is_dl_group(&p)) {
            continue;
        }
        if el.name() == "dt" {
            if !el.next_element_sibling().is_some_and(|next| next.name() == "dd") {
                offenders.push(Offender::at(el, "must be followed by a <dd>."));
            }
        } else if !el.prev_element_sibling().is_some_and(|prev| prev.is(&["dt", "dd"])) {
            offenders.push(Offender::at(el, "must be preceded by a <dt> or <dd>."));
        }
    }

    offenders.sort_by_key(|o| o.node);
    offenders
}

fn dt_dd_inside_dl(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["dt", "dd"])
        .filter(|el| !el.has_ancestor(&["dl"]))
        .map(|el| Offender::at(el, "is not inside a <dl>."))
        .collect()
}

fn figcaption_inside_figure(doc: &Document) -> Vec<Offender> {
    require_parent(doc, &["figcaption"], &["figure"], "is not inside a <figure>.")
}

fn main_not_nested(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["main"])
        .filter_map(|main| {
            let host = main.ancestor_of(&["nav", "aside", "footer", "header", "article"])?;
            Some(Offender::at(main, format!("is nested inside <{}>.", host.name())))
        })
        .collect()
}

fn options_inside_select(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["option", "optgroup"])
        .filter(|el| {
            let allowed: &[&str] = if el.name() == "option" { &["select", "datalist"] } else { &["select"] };
            !el.has_ancestor(allowed)
        })
        .map(|el| Offender::at(el, "is not inside a <select>."))
        .collect()
}

fn legend_inside_fieldset(doc: &Document) -> Vec<Offender> {
    require_parent(doc, &["legend"], &["fieldset"], "is not inside a <fieldset>.")
}

fn address_content(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(ADDRESS_FORBIDDEN)
        .filter(|el| el.has_ancestor(&["address"]))
        .map(|el| Offender::at(el, "is not allowed inside <address>."))
        .collect()
}

fn no_block_in_inline(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["div"])
        .filter_map(|div| {
            let host = div.ancestor_of(INLINE_CONTAINERS)?;
            Some(Offender::at(
                div,
                format!("is a block element nested inside inline <{}>.", host.name()),
            ))
        })
        .collect()
}

fn no_redundant_section_wrapper(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["section", "article", "aside"])
        .filter(|el| el.parent().is_some_and(|p| p.is(SECTIONING)))
        .filter(|el| el.is_first_significant_child() && el.is_last_significant_child())
        .map(|el| {
            let parent = el.parent().map(|p| p.name()).unwrap_or_default();
            Offender::at(
                el,
                format!("only wraps the content of its parent <{}>; remove one of them.", parent),
            )
        })
        .collect()
}

fn legend_first_in_fieldset(doc: &Document) -> Vec<Offender> {
    require_first_in(doc, "legend", "fieldset")
}

fn summary_first_in_details(doc: &Document) -> Vec<Offender> {
    require_first_in(doc, "summary", "details")
}

fn abbr_has_title(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["abbr"])
        .filter_map(|abbr| match abbr.attr("title") {
            None => Some(Offender::at(abbr, "is missing the title attribute.")),
            Some(t) if t.trim().is_empty() => Some(Offender::at(abbr, "has an empty title attribute.")),
            Some(_) => None,
        })
        .collect()
}

fn alt_not_filename(doc: &Document) -> Vec<Offender> {
    doc.elements_with_attr("alt")
        .filter_map(|el| {
            let alt = el.attr("alt")?;
            validators::looks_like_filename(alt).then(|| {
                Offender::at(el, format!("has alt text \"{}\" that looks like a file name.", alt.trim()))
            })
        })
        .collect()
}

fn decorative_elements_have_no_name(doc: &Document) -> Vec<Offender> {
    doc.elements()
        .filter(|el| el.attr("alt") == Some("") || el.attr_eq_ignore_case("aria-hidden", "true"))
        .filter_map(|el| {
            let names: Vec<&str> = ["title", "aria-label", "aria-labelledby"]
                .into_iter()
                .filter(|attr| el.has_non_empty_attr(attr))
                .collect();
            if names.is_empty() {
                None
            } else {
                Some(Offender::at(
                    el,
                    format!("is marked decorative but has {}.", names.join(", ")),
                ))
            }
        })
        .collect()
}

fn no_presentation_role_on_images(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(IMAGE_LIKE)
        .filter(is_presentational)
        .map(|el| {
            Offender::at(
                el,
                format!(
                    "uses role=\"{}\"; hide decorative images with aria-hidden=\"true\" instead.",
                    el.attr_lower("role").unwrap_or_default()
                ),
            )
        })
        .collect()
}

fn svg_has_role_or_hidden(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["svg"])
        .filter(|svg| !svg.has_ancestor(&["svg"]))
        .filter(|svg| !svg.has_role("img") && !svg.attr_eq_ignore_case("aria-hidden", "true"))
        .map(|svg| Offender::at(svg, "needs role=\"img\" or aria-hidden=\"true\"."))
        .collect()
}

fn media_no_autoplay(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["video", "audio"])
        .filter(|el| el.has_attr("autoplay"))
        .map(|el| Offender::at(el, "autoplays; let the user start playback."))
        .collect()
}

fn media_has_controls(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["video", "audio"])
        .filter(|el| !el.has_attr("controls"))
        .map(|el| Offender::at(el, "has no controls attribute."))
        .collect()
}

fn is_empty_exempt(el: &Element<'_>) -> bool {
    is_void_element(el.name())
        || el.is(EMPTY_ALLOWED)
        || (el.is(&["video", "audio"]) && el.has_non_empty_attr("src"))
        || (el.name() == "object" && el.has_non_empty_attr("data"))
        || el.is_hidden()
        || el.name() == "svg"
        || is_foreign(el)
}

fn no_empty_elements(doc: &Document) -> Vec<Offender> {
    doc.elements()
        .filter(|el| !is_empty_exempt(el) && el.is_empty())
        .map(|el| Offender::at(el, "is empty."))
        .collect()
}

fn tables_do_not_nest(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["table"])
        .filter(|table| table.has_ancestor(&["table"]))
        .map(|table| Offender::at(table, "is nested inside another <table>."))
        .collect()
}

fn table_has_caption(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["table"])
        .filter(|table| !is_presentational(table))
        .filter(|table| {
            !matches!(table.first_significant_child(), Some(Child::Element(first)) if first.name() == "caption")
        })
        .map(|table| Offender::at(table, "is missing a <caption> as its first child."))
        .collect()
}

fn table_section_order(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["table"])
        .filter_map(|table| {
            let mut latest: Option<(usize, &str)> = None;
            for child in table.element_children().filter(|c| !c.is_implicit()) {
                let Some(rank) = TABLE_SECTIONS.iter().position(|s| *s == child.name()) else {
                    continue;
                };
                match latest {
                    Some((seen, seen_name)) if rank < seen => {
                        return Some(Offender::at(
                            table,
                            format!(
                                "has <{}> after <{}>; use the order caption, colgroup, thead, tfoot, tbody.",
                                child.name(),
                                seen_name
                            ),
                        ));
                    }
                    Some((seen, _)) if rank == seen => {}
                    _ => latest = Some((rank, child.name())),
                }
            }
            None
        })
        .collect()
}

fn table_has_thead(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["table"])
        .filter(|table| !is_presentational(table))
        .filter(|table| {
            let written_tbody = table
                .element_children()
                .any(|c| c.name() == "tbody" && !c.is_implicit());
            written_tbody && !table.element_children().any(|c| c.name() == "thead")
        })
        .map(|table| Offender::at(table, "is missing a <thead>."))
        .collect()
}

fn script_links_have_button_role(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["a"])
        .filter_map(|a| {
            let href = a.attr("href")?;
            let scripted = href.trim() == "#" || validators::strip_scheme(href, "javascript:").is_some();
            (scripted && !a.has_role("button")).then(|| {
                Offender::at(a, format!("has href=\"{}\" but no role=\"button\".", href.trim()))
            })
        })
        .collect()
}

fn heading_role_has_level(doc: &Document) -> Vec<Offender> {
    doc.elements_with_role("heading")
        .filter(|el| !el.has_non_empty_attr("aria-level"))
        .map(|el| Offender::at(el, "has role=\"heading\" but no aria-level."))
        .collect()
}

fn labels_have_single_control(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["label"])
        .filter(|label| !label.has_non_empty_attr("for"))
        .filter_map(|label| {
            let controls = label.descendants().filter(is_labelable).count();
            match controls {
                1 => None,
                0 => Some(Offender::at(label, "has no for attribute and contains no form control.")),
                n => Some(Offender::at(
                    label,
                    format!("contains {} form controls; a label can only describe one.", n),
                )),
            }
        })
        .collect()
}

fn dir_matches_lang(doc: &Document) -> Vec<Offender> {
    doc.elements()
        .filter(|el| el.attr_lower("dir").as_deref() == Some("rtl"))
        .filter_map(|el| match el.inherited_attr("lang") {
            Some((_, lang)) if validators::is_rtl_language(lang) => None,
            Some((_, lang)) if !lang.trim().is_empty() => Some(Offender::at(
                el,
                format!("has dir=\"rtl\" but its language \"{}\" is not right-to-left.", lang.trim()),
            )),
            _ => Some(Offender::at(el, "has dir=\"rtl\" but no right-to-left lang.")),
        })
        .collect()
}

fn rtl_lang_declares_dir(doc: &Document) -> Vec<Offender> {
    doc.elements_with_attr("lang")
        .filter(|el| el.attr("lang").is_some_and(validators::is_rtl_language))
        .filter(|el| {
            !matches!(el.inherited_attr("dir"), Some((_, dir)) if dir.trim().eq_ignore_ascii_case("rtl"))
        })
        .map(|el| {
            Offender::at(
                el,
                format!(
                    "has lang=\"{}\" but does not declare dir=\"rtl\".",
                    el.attr("lang").unwrap_or_default().trim()
                ),
            )
        })
        .collect()
}

fn nested_lang_declares_dir(doc: &Document) -> Vec<Offender> {
    doc.elements_with_attr("lang")
        .filter(|el| !el.has_attr("dir"))
        .filter_map(|el| {
            let lang = el.attr("lang")?.trim();
            if lang.is_empty() {
                return None;
            }
            let (_, outer) = el.parent()?.inherited_attr("lang")?;
            let changes = validators::primary_language(outer) != validators::primary_language(lang);
            (changes && validators::is_rtl_language(outer)).then(|| {
                Offender::at(
                    el,
                    format!(
                        "switches to lang=\"{}\" inside right-to-left \"{}\" content without declaring dir.",
                        lang,
                        outer.trim()
                    ),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(rule: &Rule, html: &str) -> Vec<String> {
        let doc = Document::parse(html);
        rule.evaluate(&doc).into_iter().map(|v| v.message).collect()
    }

    #[test]
    fn test_li_inside_list() {
        let html = "<ul><li>a</li></ul><ol><li>b</li></ol><menu><li>c</li></menu><div><li>d</li></div>";
        let messages = run(&LI_INSIDE_LIST, html);
        assert_eq!(messages, vec!["LI element is not inside a <ul>, <ol> or <menu>.".to_string()]);
    }

    #[test]
    fn test_dl_structure() {
        assert!(run(&DL_STRUCTURE, "<dl><dt>T</dt><dd>D</dd><dt>U</dt><dd>E</dd><dd>F</dd></dl>").is_empty());
        assert!(run(&DL_STRUCTURE, "<dl><div><dt>T</dt><dd>D</dd></div></dl>").is_empty());

        let messages = run(&DL_STRUCTURE, "<dl><p>x</p><dt>T</dt><dt>U</dt><dd>D</dd></dl>");
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("P element is not allowed directly inside <dl>"));
        assert!(messages[1].starts_with("DT element must be followed by a <dd>"));

        let messages = run(&DL_STRUCTURE, "<dl><dd>D</dd><div><span>x</span></div></dl>");
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("preceded by a <dt> or <dd>"));
        assert!(messages[1].starts_with("SPAN element is not allowed inside a <div> grouping"));
    }

    #[test]
    fn test_dt_dd_inside_dl() {
        let messages = run(&DT_DD_INSIDE_DL, "<dl><dt>A</dt><dd>B</dd></dl><div><dt>C</dt><dd>D</dd></div>");
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_figcaption_inside_figure() {
        let html = "<figure><img src=\"a.png\" alt=\"A\"><figcaption>A</figcaption></figure><div><figcaption>B</figcaption></div>";
        assert_eq!(run(&FIGCAPTION_INSIDE_FIGURE, html).len(), 1);
    }

    #[test]
    fn test_main_not_nested() {
        assert!(run(&MAIN_NOT_NESTED, "<body><main>x</main></body>").is_empty());
        let messages = run(&MAIN_NOT_NESTED, "<article><main>x</main></article><nav><div><main>y</main></div></nav>");
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("<article>"));
        assert!(messages[1].contains("<nav>"));
    }

    #[test]
    fn test_options_inside_select() {
        let html = r#"
            <select aria-label="A"><optgroup label="G"><option>a</option></optgroup></select>
            <datalist id="d"><option value="x"></option></datalist>
            <div><option>loose</option></div>
        "#;
        let messages = run(&OPTIONS_INSIDE_SELECT, html);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("OPTION element"));
    }

    #[test]
    fn test_legend_inside_fieldset() {
        let html = "<fieldset><legend>A</legend></fieldset><div><legend>B</legend></div>";
        assert_eq!(run(&LEGEND_INSIDE_FIELDSET, html).len(), 1);
    }

    #[test]
    fn test_address_content() {
        assert!(run(&ADDRESS_CONTENT, "<address><a href=\"mailto:a@example.com\">Mail</a></address>").is_empty());
        let messages = run(&ADDRESS_CONTENT, "<address><h2>Contact</h2><section>x</section></address>");
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("H2 element"));
    }

    #[test]
    fn test_block_in_inline() {
        let messages = run(&NO_BLOCK_IN_INLINE, "<span><div>x</div></span><div><span>ok</span></div><label><div>y</div></label>");
        assert_eq!(messages.len(), 2);
        assert!(messages[0].ends_with("inside inline <span>."));
        assert!(messages[1].ends_with("inside inline <label>."));
    }

    #[test]
    fn test_redundant_section_wrapper() {
        let messages = run(&NO_REDUNDANT_SECTION_WRAPPER, "<article>\n  <section><p>x</p></section>\n</article>");
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("parent <article>"));
        assert!(run(&NO_REDUNDANT_SECTION_WRAPPER, "<article><h1>T</h1><section><p>x</p></section></article>").is_empty());
        assert!(run(&NO_REDUNDANT_SECTION_WRAPPER, "<div><section><p>x</p></section></div>").is_empty());
    }

    #[test]
    fn test_first_children() {
        assert!(run(&LEGEND_FIRST_IN_FIELDSET, "<fieldset>\n <legend>A</legend><input type=\"text\"></fieldset>").is_empty());
        assert_eq!(run(&LEGEND_FIRST_IN_FIELDSET, "<fieldset><input type=\"text\"><legend>A</legend></fieldset>").len(), 1);
        assert_eq!(run(&LEGEND_FIRST_IN_FIELDSET, "<fieldset>Intro<legend>A</legend></fieldset>").len(), 1);
        assert!(run(&SUMMARY_FIRST_IN_DETAILS, "<details><summary>More</summary>x</details>").is_empty());
        assert_eq!(run(&SUMMARY_FIRST_IN_DETAILS, "<details><p>x</p><summary>More</summary></details>").len(), 1);
    }

    #[test]
    fn test_abbr_title() {
        let messages = run(&ABBR_HAS_TITLE, r#"<abbr>A</abbr><abbr title=" ">B</abbr><abbr title="Cee">C</abbr>"#);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("missing the title"));
        assert!(messages[1].contains("empty title"));
    }

    #[test]
    fn test_alt_filename() {
        let messages = run(&ALT_NOT_FILENAME, r#"<img src="a.png" alt="hero-banner.jpg"><img src="b.png" alt="Team photo">"#);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("\"hero-banner.jpg\""));
    }

    #[test]
    fn test_decorative_with_name() {
        let html = r#"
            <img src="a.png" alt="" title="Logo">
            <img src="b.png" alt="">
            <span aria-hidden="true" aria-label="Star">*</span>
            <img src="c.png" alt="Chart" title="Chart">
        "#;
        let messages = run(&DECORATIVE_ELEMENTS_HAVE_NO_NAME, html);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].ends_with("has title."));
        assert!(messages[1].starts_with("SPAN element"));
    }

    #[test]
    fn test_presentation_role_on_images() {
        let html = r#"<img src="a.png" alt="" role="presentation"><svg role="none"></svg><img src="b.png" alt="" aria-hidden="true"><div role="presentation">x</div>"#;
        assert_eq!(run(&NO_PRESENTATION_ROLE_ON_IMAGES, html).len(), 2);
    }

    #[test]
    fn test_svg_role_or_hidden() {
        let html = r#"<svg role="img" aria-label="A"></svg><svg aria-hidden="true"></svg><svg><svg></svg></svg>"#;
        assert_eq!(run(&SVG_HAS_ROLE_OR_HIDDEN, html).len(), 1);
    }

    #[test]
    fn test_media() {
        let html = r#"<video src="a.mp4" controls></video><video src="b.mp4" autoplay></video><audio src="c.mp3" controls autoplay></audio>"#;
        assert_eq!(run(&MEDIA_NO_AUTOPLAY, html).len(), 2);
        let missing = run(&MEDIA_HAS_CONTROLS, html);
        assert_eq!(missing.len(), 1);
        assert!(missing[0].starts_with("VIDEO element has no controls"));
    }

    #[test]
    fn test_empty_elements() {
        let html = r#"
            <p></p>
            <div> </div>
            <span hidden></span>
            <i aria-hidden="true"></i>
            <br><img src="a.png" alt="">
            <iframe title="x" src="/x"></iframe>
            <textarea aria-label="t"></textarea>
            <video src="a.mp4" controls></video>
            <svg aria-hidden="true"><path d="M0"></path></svg>
            <p>text</p>
        "#;
        let messages = run(&NO_EMPTY_ELEMENTS, html);
        assert_eq!(messages, vec!["P element is empty.".to_string(), "DIV element is empty.".to_string()]);
    }

    #[test]
    fn test_nested_tables() {
        let html = "<table><tr><td><table><tr><td>x</td></tr></table></td></tr></table>";
        assert_eq!(run(&TABLES_DO_NOT_NEST, html).len(), 1);
    }

    #[test]
    fn test_table_caption_and_thead() {
        let html = "<table><tbody><tr><td>X</td></tr></tbody></table>";
        let caption = run(&TABLE_HAS_CAPTION, html);
        assert_eq!(caption.len(), 1);
        assert!(caption[0].contains("missing a <caption> as its first child"));
        let thead = run(&TABLE_HAS_THEAD, html);
        assert_eq!(thead.len(), 1);
        assert!(thead[0].contains("missing a <thead>"));

        let good = "<table><caption>C</caption><thead><tr><th>H</th></tr></thead><tbody><tr><td>X</td></tr></tbody></table>";
        assert!(run(&TABLE_HAS_CAPTION, good).is_empty());
        assert!(run(&TABLE_HAS_THEAD, good).is_empty());

        let layout = "<table role=\"presentation\"><tbody><tr><td>X</td></tr></tbody></table>";
        assert!(run(&TABLE_HAS_CAPTION, layout).is_empty());
        assert!(run(&TABLE_HAS_THEAD, layout).is_empty());
    }

    #[test]
    fn test_bare_rows_do_not_need_thead() {
        let rows = "<table><caption>C</caption><tr><th>H</th></tr><tr><td>x</td></tr></table>";
        assert!(run(&TABLE_HAS_THEAD, rows).is_empty());
        assert!(run(&TABLE_HAS_CAPTION, rows).is_empty());

        let written = "<table><caption>C</caption><tbody><tr><td>x</td></tr></tbody></table>";
        assert_eq!(run(&TABLE_HAS_THEAD, written).len(), 1);
    }

    #[test]
    fn test_table_section_order() {
        let ordered = "<table><caption>C</caption><colgroup><col></colgroup><thead><tr><th>H</th></tr></thead><tfoot><tr><td>F</td></tr></tfoot><tbody><tr><td>X</td></tr></tbody></table>";
        assert!(run(&TABLE_SECTION_ORDER, ordered).is_empty());

        let skipped = "<table><thead><tr><th>H</th></tr></thead><tbody><tr><td>X</td></tr></tbody></table>";
        assert!(run(&TABLE_SECTION_ORDER, skipped).is_empty());

        let inverted = "<table><tbody><tr><td>X</td></tr></tbody><thead><tr><th>H</th></tr></thead></table>";
        let messages = run(&TABLE_SECTION_ORDER, inverted);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("<thead> after <tbody>"));

        let bare_rows = "<table><tr><td>X</td></tr><tfoot><tr><td>F</td></tr></tfoot></table>";
        assert!(run(&TABLE_SECTION_ORDER, bare_rows).is_empty());
    }

    #[test]
    fn test_script_links() {
        let html = r##"
            <a href="javascript:void(0)">A</a>
            <a href="#">B</a>
            <a href="#" role="button">C</a>
            <a href="#section">D</a>
        "##;
        let messages = run(&SCRIPT_LINKS_HAVE_BUTTON_ROLE, html);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("javascript:void(0)"));
    }

    #[test]
    fn test_heading_level() {
        let html = r#"<div role="heading">A</div><div role="heading" aria-level="2">B</div>"#;
        assert_eq!(run(&HEADING_ROLE_HAS_LEVEL, html).len(), 1);
    }

    #[test]
    fn test_labels_single_control() {
        let html = r#"
            <label for="x">X</label>
            <label>One <input type="text"></label>
            <label>None</label>
            <label>Two <input type="text"><select></select></label>
        "#;
        let messages = run(&LABELS_HAVE_SINGLE_CONTROL, html);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("contains no form control"));
        assert!(messages[1].contains("contains 2 form controls"));
    }

    #[test]
    fn test_dir_matches_lang() {
        assert!(run(&DIR_MATCHES_LANG, r#"<p lang="ar" dir="rtl">مرحبا</p>"#).is_empty());
        assert!(run(&DIR_MATCHES_LANG, r#"<div lang="he"><p dir="RTL">שלום</p></div>"#).is_empty());
        let messages = run(&DIR_MATCHES_LANG, r#"<p lang="en" dir="rtl">Hello</p><p dir="rtl">x</p>"#);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("\"en\" is not right-to-left"));
        assert!(messages[1].contains("no right-to-left lang"));
    }

    #[test]
    fn test_rtl_lang_declares_dir() {
        assert!(run(&RTL_LANG_DECLARES_DIR, r#"<p lang="ar" dir="rtl">x</p>"#).is_empty());
        assert!(run(&RTL_LANG_DECLARES_DIR, r#"<div dir="rtl"><p lang="fa">x</p></div>"#).is_empty());
        let messages = run(&RTL_LANG_DECLARES_DIR, r#"<p lang="ur">x</p><p lang="en">y</p>"#);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("lang=\"ur\""));
    }

    #[test]
    fn test_nested_lang_declares_dir() {
        let html = r#"
            <div lang="ar" dir="rtl">
              <span lang="en">English</span>
              <span lang="en" dir="ltr">English</span>
              <span lang="ar-EG">Arabic</span>
            </div>
            <div lang="fr"><span lang="de">Deutsch</span></div>
        "#;
        let messages = run(&NESTED_LANG_DECLARES_DIR, html);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("lang=\"en\""));
        assert!(messages[0].contains("\"ar\""));
    }
}
