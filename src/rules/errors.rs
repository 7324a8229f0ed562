// SPDX-License-Identifier: PMPL-1.0-or-later
//! Errors: defects that break assistive technology or are invalid HTML.
//!
//! Covers identifiers and language tags, names and labels of interactive
//! elements and form fields, image alternatives, document-level metadata
//! (`lang`, `<title>`, charset, viewport), required ARIA state attributes and
//! interactive nesting.

use super::{
    has_aria_name, is_foreign, is_interactive, is_labelled, label_targets, Offender, Rule,
    UNLABELED_INPUT_TYPES,
};
use crate::dom::{Document, Element};
use crate::validators;

/// Attributes only meaningful on a submit button.
const SUBMIT_ONLY_ATTRIBUTES: &[&str] =
    &["formmethod", "formaction", "formtarget", "formenctype", "formnovalidate"];

/// Elements allowed to carry `width`/`height` attributes.
const SIZED_ELEMENTS: &[&str] =
    &["img", "iframe", "svg", "canvas", "object", "embed", "video", "source"];

/// Semantic markup a presentational table must not use.
const TABLE_SEMANTIC_ELEMENTS: &[&str] = &["caption", "th", "thead", "tfoot", "colgroup"];
const TABLE_SEMANTIC_ATTRIBUTES: &[&str] = &["scope", "headers", "axis"];

rule!(Errors, ID_HAS_NO_WHITESPACE, "id-has-no-whitespace",
    "id values must not contain whitespace",
    "have whitespace in their id", id_has_no_whitespace);
rule!(Errors, LANG_HAS_NO_WHITESPACE, "lang-has-no-whitespace",
    "lang values must not contain whitespace",
    "have whitespace in their lang attribute", lang_has_no_whitespace);
rule!(Errors, MAP_NAME_HAS_NO_WHITESPACE, "map-name-has-no-whitespace",
    "<map> names must not contain whitespace",
    "are <map> elements with whitespace in their name", map_name_has_no_whitespace);
rule!(Errors, TABINDEX_NOT_POSITIVE, "tabindex-not-positive",
    "tabindex must not be greater than 0",
    "have a positive tabindex", tabindex_not_positive);
rule!(Errors, HREF_NOT_EMPTY, "href-not-empty",
    "href must not be empty or whitespace",
    "have an empty href attribute", href_not_empty);
rule!(Errors, INTERACTIVE_ELEMENTS_HAVE_NAMES, "interactive-elements-have-names",
    "Links and buttons need an accessible name",
    "have no accessible name", interactive_elements_have_names);
rule!(Errors, IMAGES_HAVE_ALT, "images-have-alt",
    "Images, areas and image inputs need an alt attribute that is not whitespace-only",
    "are missing a usable alt attribute", images_have_alt);
rule!(Errors, IMG_ROLE_HAS_LABEL, "img-role-has-label",
    "role=\"img\" needs aria-label or aria-labelledby",
    "have role=\"img\" without a label", img_role_has_label);
rule!(Errors, IMAGES_HAVE_VALID_SRC, "images-have-valid-src",
    "Images need a meaningful src or srcset",
    "are images without a meaningful src", images_have_valid_src);
rule!(Errors, LABEL_FOR_NOT_EMPTY, "label-for-not-empty",
    "label[for] must not be empty or whitespace",
    "are labels with an empty for attribute", label_for_not_empty);
rule!(Errors, FORM_FIELDS_HAVE_LABELS, "form-fields-have-labels",
    "Every labelable form field needs a label",
    "are form fields without a label", form_fields_have_labels);
rule!(Errors, BUTTON_INPUTS_HAVE_VALUE, "button-inputs-have-value",
    "Button and submit inputs need a value or label",
    "are button inputs without a value", button_inputs_have_value);
rule!(Errors, BUTTONS_HAVE_TYPE, "buttons-have-type",
    "<button> needs an explicit type",
    "are buttons without a valid type", buttons_have_type);
rule!(Errors, SUBMIT_ATTRIBUTES_ONLY_ON_SUBMIT, "submit-attributes-only-on-submit",
    "form* override attributes belong on submit buttons only",
    "carry submit-only attributes without being submit buttons", submit_attributes_only_on_submit);
rule!(Errors, DISABLED_CLASS_HAS_ATTRIBUTE, "disabled-class-has-attribute",
    "Elements styled as disabled must actually be disabled",
    "are styled as disabled without being disabled", disabled_class_has_attribute);
rule!(Errors, INPUTS_HAVE_TYPE, "inputs-have-type",
    "<input> needs a non-empty type",
    "are inputs without a type", inputs_have_type);
rule!(Errors, OPTGROUPS_HAVE_LABEL, "optgroups-have-label",
    "<optgroup> needs a label",
    "are option groups without a label", optgroups_have_label);
rule!(Errors, IFRAMES_HAVE_TITLE, "iframes-have-title",
    "<iframe> needs a non-empty title",
    "are iframes without a title", iframes_have_title);
rule!(Errors, FORMS_HAVE_ACTION, "forms-have-action",
    "<form> needs a non-empty action",
    "are forms without an action", forms_have_action);
rule!(Errors, HTML_HAS_LANG, "html-has-lang",
    "The root <html> needs a non-empty lang without whitespace",
    "are root elements without a valid lang", html_has_lang);
rule!(Errors, PRESENTATION_TABLES_HAVE_NO_SEMANTICS, "presentation-tables-have-no-semantics",
    "Tables with role=\"presentation\" must not use data-table markup",
    "are presentational tables using data-table markup", presentation_tables_have_no_semantics);
rule!(Errors, WIDTH_HEIGHT_ALLOWED, "width-height-allowed",
    "width/height attributes are only allowed on embedded content",
    "use width or height attributes where they are not allowed", width_height_allowed);
rule!(Errors, NO_INLINE_EVENT_HANDLERS, "no-inline-event-handlers",
    "No inline on* event handler attributes",
    "use inline event handlers", no_inline_event_handlers);
rule!(Errors, CSS_IDENTIFIERS_ARE_VALID, "css-identifiers-are-valid",
    "id and class tokens must be valid CSS identifiers",
    "use ids or classes that are not valid CSS identifiers", css_identifiers_are_valid);
rule!(Errors, PAGE_HAS_TITLE, "page-has-title",
    "A page needs a non-empty <title>",
    "are missing or empty titles", page_has_title);
rule!(Errors, VIEWPORT_ALLOWS_ZOOM, "viewport-allows-zoom",
    "The viewport meta must not restrict zooming",
    "are viewport declarations that restrict zoom", viewport_allows_zoom);
rule!(Errors, CHARSET_IS_UTF8, "charset-is-utf8",
    "The charset must be utf-8 and declared first in <head>",
    "are invalid character set declarations", charset_is_utf8);
rule!(Errors, DIR_ATTRIBUTE_IS_VALID, "dir-attribute-is-valid",
    "dir must be ltr, rtl or auto",
    "have an invalid dir attribute", dir_attribute_is_valid);
rule!(Errors, NO_ACCESSKEY, "no-accesskey",
    "accesskey must not be used",
    "use accesskey", no_accesskey);
rule!(Errors, GROUPED_INPUTS_HAVE_NAME, "grouped-inputs-have-name",
    "Grouped radio buttons and checkboxes need a name",
    "are grouped inputs without a name", grouped_inputs_have_name);
rule!(Errors, RADIOS_INSIDE_FIELDSET, "radios-inside-fieldset",
    "Radio buttons belong inside a <fieldset>",
    "are radio buttons outside a <fieldset>", radios_inside_fieldset);
rule!(Errors, SLIDER_ROLE_HAS_REQUIRED_ATTRIBUTES, "slider-role-has-required-attributes",
    "role=\"slider\" needs aria-valuemin, aria-valuemax and aria-valuenow",
    "are sliders missing required ARIA attributes", slider_role_has_required_attributes);
rule!(Errors, SPINBUTTON_ROLE_HAS_REQUIRED_ATTRIBUTES, "spinbutton-role-has-required-attributes",
    "role=\"spinbutton\" needs aria-valuemin, aria-valuemax and aria-valuenow",
    "are spinbuttons missing required ARIA attributes", spinbutton_role_has_required_attributes);
rule!(Errors, SCROLLBAR_ROLE_HAS_REQUIRED_ATTRIBUTES, "scrollbar-role-has-required-attributes",
    "role=\"scrollbar\" needs value range, aria-controls and aria-orientation",
    "are scrollbars missing required ARIA attributes", scrollbar_role_has_required_attributes);
rule!(Errors, CHECKBOX_ROLE_HAS_REQUIRED_ATTRIBUTES, "checkbox-role-has-required-attributes",
    "role=\"checkbox\" needs aria-checked",
    "are checkboxes missing aria-checked", checkbox_role_has_required_attributes);
rule!(Errors, COMBOBOX_ROLE_HAS_REQUIRED_ATTRIBUTES, "combobox-role-has-required-attributes",
    "role=\"combobox\" needs aria-expanded",
    "are comboboxes missing aria-expanded", combobox_role_has_required_attributes);
rule!(Errors, NO_NESTED_INTERACTIVE, "no-nested-interactive",
    "Interactive elements must not be nested inside links, buttons or labels",
    "are interactive elements nested inside other interactive elements", no_nested_interactive);

/// Errors catalog.
pub static RULES: &[Rule] = &[
    ID_HAS_NO_WHITESPACE,
    LANG_HAS_NO_WHITESPACE,
    MAP_NAME_HAS_NO_WHITESPACE,
    TABINDEX_NOT_POSITIVE,
    HREF_NOT_EMPTY,
    INTERACTIVE_ELEMENTS_HAVE_NAMES,
    IMAGES_HAVE_ALT,
    IMG_ROLE_HAS_LABEL,
    IMAGES_HAVE_VALID_SRC,
    LABEL_FOR_NOT_EMPTY,
    FORM_FIELDS_HAVE_LABELS,
    BUTTON_INPUTS_HAVE_VALUE,
    BUTTONS_HAVE_TYPE,
    SUBMIT_ATTRIBUTES_ONLY_ON_SUBMIT,
    DISABLED_CLASS_HAS_ATTRIBUTE,
    INPUTS_HAVE_TYPE,
    OPTGROUPS_HAVE_LABEL,
    IFRAMES_HAVE_TITLE,
    FORMS_HAVE_ACTION,
    HTML_HAS_LANG,
    PRESENTATION_TABLES_HAVE_NO_SEMANTICS,
    WIDTH_HEIGHT_ALLOWED,
    NO_INLINE_EVENT_HANDLERS,
    CSS_IDENTIFIERS_ARE_VALID,
    PAGE_HAS_TITLE,
    VIEWPORT_ALLOWS_ZOOM,
    CHARSET_IS_UTF8,
    DIR_ATTRIBUTE_IS_VALID,
    NO_ACCESSKEY,
    GROUPED_INPUTS_HAVE_NAME,
    RADIOS_INSIDE_FIELDSET,
    SLIDER_ROLE_HAS_REQUIRED_ATTRIBUTES,
    SPINBUTTON_ROLE_HAS_REQUIRED_ATTRIBUTES,
    SCROLLBAR_ROLE_HAS_REQUIRED_ATTRIBUTES,
    CHECKBOX_ROLE_HAS_REQUIRED_ATTRIBUTES,
    COMBOBOX_ROLE_HAS_REQUIRED_ATTRIBUTES,
    NO_NESTED_INTERACTIVE,
];

/// Flag elements whose non-blank `attr` value contains whitespace.
fn whitespace_in<'a>(elements: impl Iterator<Item = Element<'a>>, attr: &str) -> Vec<Offender> {
    elements
        .filter_map(|el| {
            let value = el.attr(attr)?;
            if value.trim().is_empty() || !value.chars().any(char::is_whitespace) {
                return None;
            }
            Some(Offender::at(
                el,
                format!("has whitespace in its {} attribute: \"{}\".", attr, value),
            ))
        })
        .collect()
}

/// Flag elements where `attr` is missing, or present but blank.
fn required_attribute(doc: &Document, tags: &[&str], attr: &str) -> Vec<Offender> {
    doc.elements()
        .filter(|el| el.is(tags))
        .filter_map(|el| match el.attr(attr) {
            None => Some(Offender::at(el, format!("is missing the {} attribute.", attr))),
            Some(v) if v.trim().is_empty() => {
                Some(Offender::at(el, format!("has an empty {} attribute.", attr)))
            }
            Some(_) => None,
        })
        .collect()
}

/// Flag elements with `role` that lack any of `attrs`, listing every missing one.
fn required_aria(doc: &Document, role: &str, attrs: &[&str]) -> Vec<Offender> {
    doc.elements_with_role(role)
        .filter_map(|el| {
            let missing: Vec<String> = attrs
                .iter()
                .filter(|attr| !el.has_non_empty_attr(attr))
                .map(|attr| format!("[{}]", attr))
                .collect();
            if missing.is_empty() {
                None
            } else {
                Some(Offender::at(
                    el,
                    format!("has role=\"{}\" but is missing {}.", role, missing.join(", ")),
                ))
            }
        })
        .collect()
}

fn id_has_no_whitespace(doc: &Document) -> Vec<Offender> {
    whitespace_in(doc.elements(), "id")
}

fn lang_has_no_whitespace(doc: &Document) -> Vec<Offender> {
    whitespace_in(doc.elements(), "lang")
}

fn map_name_has_no_whitespace(doc: &Document) -> Vec<Offender> {
    whitespace_in(doc.elements_by_tag(&["map"]), "name")
}

fn tabindex_not_positive(doc: &Document) -> Vec<Offender> {
    doc.elements_with_attr("tabindex")
        .filter_map(|el| {
            let value = el.attr("tabindex")?;
            let index: i64 = value.trim().parse().ok()?;
            (index > 0).then(|| {
                Offender::at(
                    el,
                    format!("has tabindex=\"{}\"; values above 0 break the natural tab order.", value.trim()),
                )
            })
        })
        .collect()
}

fn href_not_empty(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["a", "area", "link", "base"])
        .filter(|el| el.has_blank_attr("href"))
        .map(|el| Offender::at(el, "has an empty href attribute."))
        .collect()
}

/// Accessible name from content: text, or alt text of a contained image.
fn has_content_name(el: &Element<'_>) -> bool {
    if !el.text_content().trim().is_empty() {
        return true;
    }
    el.descendants().any(|d| {
        (d.is(&["img", "area"]) || d.is_input_type("image")) && d.has_non_empty_attr("alt")
            || has_aria_name(&d)
    })
}

fn interactive_elements_have_names(doc: &Document) -> Vec<Offender> {
    doc.elements()
        .filter(|el| {
            (el.name() == "a" && el.has_attr("href"))
                || el.name() == "button"
                || el.has_role("button")
                || el.has_role("link")
        })
        .filter(|el| el.name() != "input")
        .filter(|el| !has_content_name(el) && !has_aria_name(el) && !el.has_non_empty_attr("title"))
        .map(|el| {
            Offender::at(
                el,
                "has no accessible name. Add text content, a title, aria-label or aria-labelledby.",
            )
        })
        .collect()
}

fn images_have_alt(doc: &Document) -> Vec<Offender> {
    doc.elements()
        .filter(|el| el.is(&["img", "area"]) || el.is_input_type("image"))
        .filter_map(|el| match el.attr("alt") {
            None => Some(Offender::at(el, "is missing the alt attribute.")),
            Some(alt) if !alt.is_empty() && alt.trim().is_empty() => Some(Offender::at(
                el,
                "has a whitespace-only alt attribute. Use alt=\"\" for decorative images or describe the image.",
            )),
            Some(_) => None,
        })
        .collect()
}

fn img_role_has_label(doc: &Document) -> Vec<Offender> {
    doc.elements_with_role("img")
        .filter(|el| !has_aria_name(el))
        .map(|el| Offender::at(el, "has role=\"img\" but no aria-label or aria-labelledby."))
        .collect()
}

fn images_have_valid_src(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["img"])
        .filter_map(|img| {
            let src = img.attr("src");
            let srcset = img.attr("srcset");
            if src.is_none() && srcset.is_none() {
                return Some(Offender::at(img, "is missing a src attribute."));
            }
            let usable_src = src.is_some_and(|s| !validators::is_meaningless_src(s));
            let usable_srcset = srcset.is_some_and(|s| !validators::is_meaningless_src(s));
            if usable_src || usable_srcset {
                None
            } else {
                Some(Offender::at(
                    img,
                    format!(
                        "has an empty or meaningless src \"{}\".",
                        src.or(srcset).unwrap_or_default()
                    ),
                ))
            }
        })
        .collect()
}

fn label_for_not_empty(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["label"])
        .filter(|label| label.has_blank_attr("for"))
        .map(|label| Offender::at(label, "has an empty for attribute."))
        .collect()
}

fn form_fields_have_labels(doc: &Document) -> Vec<Offender> {
    let targets = label_targets(doc);
    doc.elements_by_tag(&["input", "select", "textarea", "meter", "output", "progress"])
        .filter(|el| el.name() != "input" || !UNLABELED_INPUT_TYPES.contains(&el.input_type().as_str()))
        .filter(|el| !is_labelled(el, &targets))
        .map(|el| {
            Offender::at(
                el,
                "has no associated label. Use <label for>, a wrapping <label>, aria-label, aria-labelledby or title.",
            )
        })
        .collect()
}

fn button_inputs_have_value(doc: &Document) -> Vec<Offender> {
    let targets = label_targets(doc);
    doc.elements_by_tag(&["input"])
        .filter(|el| el.is_input_type("button") || el.is_input_type("submit"))
        .filter(|el| !el.has_non_empty_attr("value") && !is_labelled(el, &targets))
        .map(|el| Offender::at(el, "has no value; screen readers have nothing to announce."))
        .collect()
}

fn buttons_have_type(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["button"])
        .filter_map(|button| match button.attr_lower("type") {
            None if ["form", "formaction", "formtarget"].iter().any(|a| button.has_attr(a)) => None,
            None => Some(Offender::at(
                button,
                "is missing a type attribute. Use type=\"button\", \"submit\" or \"reset\".",
            )),
            Some(t) if t.is_empty() => Some(Offender::at(button, "has an empty type attribute.")),
            Some(t) if !matches!(t.as_str(), "button" | "submit" | "reset") => Some(Offender::at(
                button,
                format!("has an invalid type=\"{}\".", t),
            )),
            Some(_) => None,
        })
        .collect()
}

fn is_submit_button(el: &Element<'_>) -> bool {
    match el.name() {
        "button" => match el.attr_lower("type").as_deref() {
            Some("button") | Some("reset") => false,
            _ => true,
        },
        "input" => el.is_input_type("submit") || el.is_input_type("image"),
        _ => false,
    }
}

fn submit_attributes_only_on_submit(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["button", "input"])
        .filter(|el| !is_submit_button(el))
        .filter_map(|el| {
            let used: Vec<&str> = SUBMIT_ONLY_ATTRIBUTES
                .iter()
                .copied()
                .filter(|attr| el.has_attr(attr))
                .collect();
            if used.is_empty() {
                None
            } else {
                Some(Offender::at(
                    el,
                    format!("has {} but is not a submit button.", used.join(", ")),
                ))
            }
        })
        .collect()
}

fn disabled_class_has_attribute(doc: &Document) -> Vec<Offender> {
    doc.elements_with_attr("class")
        .filter_map(|el| {
            let token = el
                .attr("class")
                .into_iter()
                .flat_map(validators::class_tokens)
                .find(|t| validators::is_disabled_class(t))?;
            let disabled = el.has_attr("disabled")
                || el.has_attr("readonly")
                || el.attr_eq_ignore_case("aria-disabled", "true")
                || el.ancestors().any(|a| a.name() == "fieldset" && a.has_attr("disabled"));
            (!disabled).then(|| {
                Offender::at(
                    el,
                    format!(
                        "is styled as disabled (class \"{}\") but has no disabled or readonly attribute.",
                        token
                    ),
                )
            })
        })
        .collect()
}

fn inputs_have_type(doc: &Document) -> Vec<Offender> {
    required_attribute(doc, &["input"], "type")
}

fn optgroups_have_label(doc: &Document) -> Vec<Offender> {
    required_attribute(doc, &["optgroup"], "label")
}

fn iframes_have_title(doc: &Document) -> Vec<Offender> {
    required_attribute(doc, &["iframe"], "title")
}

fn forms_have_action(doc: &Document) -> Vec<Offender> {
    required_attribute(doc, &["form"], "action")
}

fn html_has_lang(doc: &Document) -> Vec<Offender> {
    if !doc.is_full_document() {
        return Vec::new();
    }
    let html = doc.root();
    let offender = match html.attr("lang") {
        None => Offender::at(html, "is missing the lang attribute."),
        Some(lang) if lang.trim().is_empty() => Offender::at(html, "has an empty lang attribute."),
        Some(lang) if lang.chars().any(char::is_whitespace) => Offender::at(
            html,
            format!("has whitespace in its lang attribute: \"{}\".", lang),
        ),
        Some(_) => return Vec::new(),
    };
    vec![offender]
}

fn presentation_tables_have_no_semantics(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["table"])
        .filter(|table| table.has_role("presentation") || table.has_role("none"))
        .filter_map(|table| {
            let mut found: Vec<String> = Vec::new();
            for d in table.descendants() {
                if d.is(TABLE_SEMANTIC_ELEMENTS) {
                    let tag = format!("<{}>", d.name());
                    if !found.contains(&tag) {
                        found.push(tag);
                    }
                }
                for attr in TABLE_SEMANTIC_ATTRIBUTES {
                    let marker = format!("[{}]", attr);
                    if d.has_attr(attr) && !found.contains(&marker) {
                        found.push(marker);
                    }
                }
            }
            if found.is_empty() {
                None
            } else {
                Some(Offender::at(
                    table,
                    format!(
                        "has role=\"presentation\" but uses data-table markup: {}.",
                        found.join(", ")
                    ),
                ))
            }
        })
        .collect()
}

fn width_height_allowed(doc: &Document) -> Vec<Offender> {
    doc.elements()
        .filter(|el| el.has_attr("width") || el.has_attr("height"))
        .filter(|el| !el.is(SIZED_ELEMENTS) && !el.is_input_type("image") && !is_foreign(el))
        .map(|el| {
            let attrs: Vec<&str> = ["width", "height"]
                .into_iter()
                .filter(|a| el.has_attr(a))
                .collect();
            Offender::at(
                el,
                format!("uses the {} attribute; size it with CSS instead.", attrs.join(" and ")),
            )
        })
        .collect()
}

fn no_inline_event_handlers(doc: &Document) -> Vec<Offender> {
    doc.elements()
        .filter_map(|el| {
            let handlers: Vec<&str> = el
                .attrs()
                .map(|(name, _)| name)
                .filter(|name| validators::is_event_handler_attribute(name))
                .collect();
            if handlers.is_empty() {
                None
            } else {
                Some(Offender::at(
                    el,
                    format!(
                        "uses inline event handler {}; attach listeners from script instead.",
                        handlers.join(", ")
                    ),
                ))
            }
        })
        .collect()
}

fn css_identifiers_are_valid(doc: &Document) -> Vec<Offender> {
    doc.elements()
        .filter_map(|el| {
            if let Some(id) = el.attr("id").map(str::trim).filter(|id| !id.is_empty()) {
                if !validators::is_valid_css_identifier(id) {
                    return Some(Offender::at(
                        el,
                        format!("has id \"{}\", which is not a valid CSS identifier.", id),
                    ));
                }
            }
            let bad_class = el
                .attr("class")
                .into_iter()
                .flat_map(validators::class_tokens)
                .find(|t| !validators::is_valid_css_identifier(t))?;
            Some(Offender::at(
                el,
                format!("has class \"{}\", which is not a valid CSS identifier.", bad_class),
            ))
        })
        .collect()
}

fn page_has_title(doc: &Document) -> Vec<Offender> {
    if !doc.is_full_document() {
        return Vec::new();
    }
    let titles: Vec<Element<'_>> = doc
        .elements_by_tag(&["title"])
        .filter(|t| !is_foreign(t))
        .collect();
    match titles.first() {
        None => {
            let anchor = doc.head().unwrap_or_else(|| doc.root());
            vec![Offender::at(anchor, "is missing a <title> element.")]
        }
        Some(title) if title.text_content().trim().is_empty() => {
            vec![Offender::at(*title, "is empty; describe the page in its <title>.")]
        }
        Some(_) => Vec::new(),
    }
}

fn viewport_allows_zoom(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["meta"])
        .filter(|meta| meta.attr_eq_ignore_case("name", "viewport"))
        .filter_map(|meta| {
            let pairs = validators::parse_viewport(meta.attr("content").unwrap_or_default());
            let problems: Vec<String> = pairs
                .iter()
                .filter_map(|(key, value)| match key.as_str() {
                    "user-scalable" if value == "no" || value == "0" => {
                        Some(format!("user-scalable={}", value))
                    }
                    "maximum-scale" | "minimum-scale" => Some(format!("{}={}", key, value)),
                    _ => None,
                })
                .collect();
            if problems.is_empty() {
                None
            } else {
                Some(Offender::at(
                    meta,
                    format!("restricts zooming with {}.", problems.join(", ")),
                ))
            }
        })
        .collect()
}

/// Charset named by a `<meta>`: `charset="..."` or `http-equiv` content `charset=...`.
fn declared_charset(meta: &Element<'_>) -> Option<String> {
    if let Some(charset) = meta.attr("charset") {
        return Some(charset.trim().to_string());
    }
    if !meta.attr_eq_ignore_case("http-equiv", "content-type") {
        return None;
    }
    let content = meta.attr("content")?.to_ascii_lowercase();
    let start = content.find("charset=")? + "charset=".len();
    Some(content[start..].split(';').next().unwrap_or("").trim().to_string())
}

fn charset_is_utf8(doc: &Document) -> Vec<Offender> {
    let mut offenders = Vec::new();
    let declarations: Vec<(Element<'_>, String)> = doc
        .elements_by_tag(&["meta"])
        .filter_map(|meta| declared_charset(&meta).map(|c| (meta, c)))
        .collect();

    for (meta, charset) in &declarations {
        if !charset.eq_ignore_ascii_case("utf-8") {
            offenders.push(Offender::at(
                *meta,
                format!("declares charset \"{}\"; use utf-8.", charset),
            ));
        }
    }

    match declarations.first() {
        None if doc.is_full_document() => {
            let anchor = doc.head().unwrap_or_else(|| doc.root());
            offenders.push(Offender::at(anchor, "is missing a <meta charset=\"utf-8\"> declaration."));
        }
        Some((meta, _)) if doc.is_full_document() => {
            let first_in_head = meta.parent().is_some_and(|p| p.name() == "head")
                && meta.parent().and_then(|p| p.first_element_child()) == Some(*meta);
            if !first_in_head {
                offenders.push(Offender::at(*meta, "must be the first element in <head>."));
            }
        }
        _ => {}
    }

    offenders.sort_by_key(|o| o.node);
    offenders.dedup_by_key(|o| o.node);
    offenders
}

fn dir_attribute_is_valid(doc: &Document) -> Vec<Offender> {
    doc.elements_with_attr("dir")
        .filter(|el| !matches!(el.attr_lower("dir").as_deref(), Some("ltr" | "rtl" | "auto")))
        .map(|el| {
            Offender::at(
                el,
                format!(
                    "has an invalid dir=\"{}\"; use ltr, rtl or auto.",
                    el.attr("dir").unwrap_or_default()
                ),
            )
        })
        .collect()
}

fn no_accesskey(doc: &Document) -> Vec<Offender> {
    doc.elements_with_attr("accesskey")
        .map(|el| {
            Offender::at(
                el,
                format!(
                    "uses accesskey=\"{}\"; access keys clash with assistive technology shortcuts.",
                    el.attr("accesskey").unwrap_or_default()
                ),
            )
        })
        .collect()
}

fn grouped_inputs_have_name(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["input"])
        .filter(|el| el.is_input_type("radio") || el.is_input_type("checkbox"))
        .filter(|el| !el.has_non_empty_attr("name"))
        .filter(|el| {
            let input_type = el.input_type();
            let container = el.ancestor_of(&["fieldset", "form"]).unwrap_or_else(|| doc.root());
            container
                .descendants_by_tag(&["input"])
                .filter(|other| other.is_input_type(&input_type))
                .count()
                > 1
        })
        .map(|el| {
            Offender::at(
                el,
                format!("is a grouped {} input without a name attribute.", el.input_type()),
            )
        })
        .collect()
}

fn radios_inside_fieldset(doc: &Document) -> Vec<Offender> {
    doc.elements_by_tag(&["input"])
        .filter(|el| el.is_input_type("radio"))
        .filter(|el| !el.ancestors().any(|a| a.name() == "fieldset" || a.has_role("radiogroup")))
        .map(|el| Offender::at(el, "is a radio button outside a <fieldset>."))
        .collect()
}

const VALUE_RANGE: &[&str] = &["aria-valuemin", "aria-valuemax", "aria-valuenow"];

fn slider_role_has_required_attributes(doc: &Document) -> Vec<Offender> {
    required_aria(doc, "slider", VALUE_RANGE)
}

fn spinbutton_role_has_required_attributes(doc: &Document) -> Vec<Offender> {
    required_aria(doc, "spinbutton", VALUE_RANGE)
}

fn scrollbar_role_has_required_attributes(doc: &Document) -> Vec<Offender> {
    required_aria(
        doc,
        "scrollbar",
        &["aria-valuemin", "aria-valuemax", "aria-valuenow", "aria-controls", "aria-orientation"],
    )
}

fn checkbox_role_has_required_attributes(doc: &Document) -> Vec<Offender> {
    let mut offenders = required_aria(doc, "checkbox", &["aria-checked"]);
    offenders.retain(|o| {
        doc.element(o.node)
            .is_some_and(|el| !el.is_input_type("checkbox"))
    });
    offenders
}

fn combobox_role_has_required_attributes(doc: &Document) -> Vec<Offender> {
    required_aria(doc, "combobox", &["aria-expanded"])
}

/// Content that may not hold `nested`. A `<label>` wraps the control it
/// labels, so only another label is refused there.
fn is_interactive_host(host: &Element<'_>, nested: &Element<'_>) -> bool {
    match host.name() {
        "a" => host.has_attr("href"),
        "audio" | "video" => host.has_attr("controls"),
        "button" | "iframe" | "select" | "textarea" => true,
        "label" => nested.name() == "label",
        _ => false,
    }
}

fn no_nested_interactive(doc: &Document) -> Vec<Offender> {
    doc.elements()
        .filter(|el| is_interactive(el))
        .filter_map(|el| {
            let host = el.ancestors().find(|a| is_interactive_host(a, &el))?;
            Some(Offender::at(
                el,
                format!("is nested inside another interactive element (<{}>).", host.name().to_uppercase()),
            ))
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
    fn test_whitespace_in_identifiers() {
        assert_eq!(run(&ID_HAS_NO_WHITESPACE, r#"<div id="main content">x</div>"#).len(), 1);
        assert!(run(&ID_HAS_NO_WHITESPACE, r#"<div id="main-content">x</div><div id=" ">y</div>"#).is_empty());
        assert_eq!(run(&LANG_HAS_NO_WHITESPACE, r#"<p lang="en US">x</p>"#).len(), 1);
        let messages = run(&MAP_NAME_HAS_NO_WHITESPACE, r#"<map name="site nav"></map><map name="ok"></map>"#);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("MAP element with name=\"site nav\""));
    }

    #[test]
    fn test_tabindex() {
        let html = r#"<a href="/" tabindex="1">A</a><div tabindex="0">B</div><div tabindex="-1">C</div><div tabindex="x">D</div>"#;
        let messages = run(&TABINDEX_NOT_POSITIVE, html);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("tabindex=\"1\""));
    }

    #[test]
    fn test_href_not_empty() {
        let html = r#"<a href="">A</a><a href="   ">B</a><a href="/x">C</a><a>D</a>"#;
        assert_eq!(run(&HREF_NOT_EMPTY, html).len(), 2);
    }

    #[test]
    fn test_interactive_names() {
        let html = r#"
            <a href="/a">Text</a>
            <a href="/b" aria-label="Home"><i class="icon"></i></a>
            <a href="/c"><img src="c.png" alt="Cart"></a>
            <button title="Close"></button>
            <button></button>
            <a href="/d"> </a>
            <div role="button"></div>
        "#;
        let messages = run(&INTERACTIVE_ELEMENTS_HAVE_NAMES, html);
        assert_eq!(messages.len(), 3);
        assert!(messages[0].starts_with("BUTTON element"));
        assert!(messages[1].starts_with("A element"));
        assert!(messages[2].starts_with("DIV element"));
    }

    #[test]
    fn test_images_have_alt() {
        let messages = run(&IMAGES_HAVE_ALT, r#"<img src="/x.png" width="144" height="144" />"#);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("is missing the alt attribute"));

        let html = r#"<img src="a.png" alt=""><img src="b.png" alt="  "><input type="image" src="go.png"><map name="m"><area href="/a" alt="A"></map>"#;
        let messages = run(&IMAGES_HAVE_ALT, html);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("whitespace-only alt"));
        assert!(messages[1].starts_with("INPUT element"));
        assert!(messages[1].contains("missing the alt attribute"));
    }

    #[test]
    fn test_img_role_label() {
        let html = r#"<div role="img" aria-label="Chart"></div><span role="img"></span><svg role="img" aria-labelledby="t"></svg>"#;
        let messages = run(&IMG_ROLE_HAS_LABEL, html);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("SPAN element"));
    }

    #[test]
    fn test_image_src() {
        let html = r##"
            <img alt="A" src="/a.png">
            <img alt="B">
            <img alt="C" src="">
            <img alt="D" src="#">
            <img alt="E" src="/">
            <img alt="F" src="" srcset="f-1x.png 1x, f-2x.png 2x">
        "##;
        let messages = run(&IMAGES_HAVE_VALID_SRC, html);
        assert_eq!(messages.len(), 4);
        assert!(messages[0].contains("missing a src"));
        assert!(messages[2].contains("\"#\""));
    }

    #[test]
    fn test_label_for_not_empty() {
        assert_eq!(run(&LABEL_FOR_NOT_EMPTY, r#"<label for=" ">A</label><label for="x">B</label><label>C</label>"#).len(), 1);
    }

    #[test]
    fn test_form_field_labels() {
        let html = r#"
            <label for="name">Name</label><input id="name" type="text">
            <label>Email <input type="email"></label>
            <input type="search" aria-label="Search">
            <input type="text" title="Phone">
            <input type="text" aria-labelledby="h1">
            <input type="hidden" name="token">
            <input type="submit" value="Go">
            <input type="button" value="Go">
            <select id="country"></select>
            <textarea></textarea>
            <input type="text" id="orphan">
        "#;
        let messages = run(&FORM_FIELDS_HAVE_LABELS, html);
        assert_eq!(messages.len(), 3);
        assert!(messages[0].starts_with("SELECT element with id=\"country\""));
        assert!(messages[1].starts_with("TEXTAREA element"));
        assert!(messages[2].starts_with("INPUT element with id=\"orphan\""));
    }

    #[test]
    fn test_button_inputs_value() {
        let html = r#"<input type="submit"><input type="button" value="Save"><input type="button" aria-label="Close"><input type="button" value=" ">"#;
        assert_eq!(run(&BUTTON_INPUTS_HAVE_VALUE, html).len(), 2);
    }

    #[test]
    fn test_buttons_have_type() {
        let html = r#"
            <button>Missing</button>
            <button type="">Empty</button>
            <button type="submit">Ok</button>
            <button type="BUTTON">Ok</button>
            <button type="link">Bad</button>
            <button form="f">Ok</button>
            <button formaction="/go">Ok</button>
        "#;
        let messages = run(&BUTTONS_HAVE_TYPE, html);
        assert_eq!(messages.len(), 3);
        assert!(messages[0].contains("missing a type"));
        assert!(messages[1].contains("empty type"));
        assert!(messages[2].contains("invalid type=\"link\""));
    }

    #[test]
    fn test_submit_only_attributes() {
        let html = r#"
            <button type="submit" formaction="/a">Ok</button>
            <button formmethod="post">Ok (default submit)</button>
            <button type="button" formaction="/b" formnovalidate>Bad</button>
            <input type="submit" formtarget="_blank">
            <input type="text" formenctype="multipart/form-data">
        "#;
        let messages = run(&SUBMIT_ATTRIBUTES_ONLY_ON_SUBMIT, html);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("formaction, formnovalidate"));
        assert!(messages[1].starts_with("INPUT element"));
    }

    #[test]
    fn test_disabled_class() {
        let html = r#"
            <button class="btn btn-disabled" type="button">A</button>
            <button class="btn disabled" type="button" disabled>B</button>
            <input class="is-disabled" readonly>
            <a class="link--disabled" href="/" aria-disabled="true">C</a>
            <div class="disabled">D</div>
        "#;
        let messages = run(&DISABLED_CLASS_HAS_ATTRIBUTE, html);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("btn-disabled"));
        assert!(messages[1].starts_with("DIV element"));
    }

    #[test]
    fn test_required_attributes() {
        let messages = run(&INPUTS_HAVE_TYPE, r#"<input name="a"><input type="" name="b"><input type="text" name="c">"#);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("missing the type attribute"));
        assert!(messages[1].contains("empty type attribute"));

        assert_eq!(run(&OPTGROUPS_HAVE_LABEL, r#"<select><optgroup><option>A</option></optgroup><optgroup label="B"><option>B</option></optgroup></select>"#).len(), 1);
        assert_eq!(run(&IFRAMES_HAVE_TITLE, r#"<iframe src="/a"></iframe><iframe src="/b" title=" "></iframe><iframe src="/c" title="Map"></iframe>"#).len(), 2);
        assert_eq!(run(&FORMS_HAVE_ACTION, r#"<form></form><form action="/submit"></form>"#).len(), 1);
    }

    #[test]
    fn test_html_lang() {
        assert!(run(&HTML_HAS_LANG, "<p>fragment</p>").is_empty());
        assert!(run(&HTML_HAS_LANG, "<!DOCTYPE html><html lang=\"en\"><body></body></html>").is_empty());
        let missing = run(&HTML_HAS_LANG, "<!DOCTYPE html><html><body></body></html>");
        assert!(missing[0].contains("missing the lang"));
        let empty = run(&HTML_HAS_LANG, "<html lang=\"\"><body></body></html>");
        assert!(empty[0].contains("empty lang"));
        let spaced = run(&HTML_HAS_LANG, "<html lang=\"en GB\"><body></body></html>");
        assert!(spaced[0].contains("whitespace"));
    }

    #[test]
    fn test_presentation_tables() {
        let html = r#"
            <table role="presentation"><tr><td>Layout</td></tr></table>
            <table role="presentation"><caption>X</caption><tr><th scope="col">H</th></tr></table>
        "#;
        let messages = run(&PRESENTATION_TABLES_HAVE_NO_SEMANTICS, html);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("<caption>"));
        assert!(messages[0].contains("<th>"));
        assert!(messages[0].contains("[scope]"));
    }

    #[test]
    fn test_width_height() {
        let html = r#"
            <img src="a.png" alt="A" width="10" height="10">
            <svg width="20" height="20"><rect width="5" height="5"></rect></svg>
            <table width="100%"><tr><td height="20">x</td></tr></table>
            <div width="3">d</div>
        "#;
        let messages = run(&WIDTH_HEIGHT_ALLOWED, html);
        assert_eq!(messages.len(), 3);
        assert!(messages[0].starts_with("TABLE element"));
        assert!(messages[1].starts_with("TD element"));
        assert!(messages[2].contains("width attribute"));
    }

    #[test]
    fn test_inline_handlers() {
        let messages = run(&NO_INLINE_EVENT_HANDLERS, r#"<button type="button" onclick="go()" onmouseover="x()">Go</button><div data-on="x">y</div>"#);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("onclick"));
        assert!(messages[0].contains("onmouseover"));
    }

    #[test]
    fn test_css_identifiers() {
        let html = r#"<div id="1st">a</div><div class="ok --bad">b</div><div class="-2x">c</div><div id="fine" class="also-fine">d</div>"#;
        let messages = run(&CSS_IDENTIFIERS_ARE_VALID, html);
        assert_eq!(messages.len(), 3);
        assert!(messages[0].contains("id \"1st\""));
        assert!(messages[1].contains("class \"--bad\""));
    }

    #[test]
    fn test_page_title() {
        assert!(run(&PAGE_HAS_TITLE, "<p>fragment</p>").is_empty());
        assert!(run(&PAGE_HAS_TITLE, "<html><head><title>Home</title></head><body></body></html>").is_empty());
        let missing = run(&PAGE_HAS_TITLE, "<html><head></head><body></body></html>");
        assert_eq!(missing.len(), 1);
        assert!(missing[0].starts_with("HEAD element is missing a <title>"));
        let blank = run(&PAGE_HAS_TITLE, "<html><head><title>  </title></head><body></body></html>");
        assert!(blank[0].starts_with("TITLE element is empty"));
    }

    #[test]
    fn test_viewport() {
        let html = r#"
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <meta name="viewport" content="width=device-width, user-scalable=no">
            <meta name="Viewport" content="width=device-width, maximum-scale=1.0, minimum-scale=1">
        "#;
        let messages = run(&VIEWPORT_ALLOWS_ZOOM, html);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("user-scalable=no"));
        assert!(messages[1].contains("maximum-scale=1.0, minimum-scale=1"));
    }

    #[test]
    fn test_charset() {
        assert!(run(&CHARSET_IS_UTF8, r#"<html><head><meta charset="UTF-8"><title>T</title></head></html>"#).is_empty());

        let wrong = run(&CHARSET_IS_UTF8, r#"<html><head><meta charset="iso-8859-1"><title>T</title></head></html>"#);
        assert_eq!(wrong.len(), 1);
        assert!(wrong[0].contains("iso-8859-1"));

        let late = run(&CHARSET_IS_UTF8, r#"<html><head><title>T</title><meta charset="utf-8"></head></html>"#);
        assert_eq!(late.len(), 1);
        assert!(late[0].contains("first element in <head>"));

        let missing = run(&CHARSET_IS_UTF8, r#"<html><head><title>T</title></head></html>"#);
        assert!(missing[0].contains("missing a <meta charset"));

        let http_equiv = run(
            &CHARSET_IS_UTF8,
            r#"<html><head><meta http-equiv="Content-Type" content="text/html; charset=windows-1252"></head></html>"#,
        );
        assert!(http_equiv[0].contains("windows-1252"));
    }

    #[test]
    fn test_dir_values() {
        let html = r#"<p dir="RTL">a</p><p dir="auto">b</p><p dir="left">c</p><p dir="">d</p>"#;
        assert_eq!(run(&DIR_ATTRIBUTE_IS_VALID, html).len(), 2);
    }

    #[test]
    fn test_accesskey() {
        assert_eq!(run(&NO_ACCESSKEY, r#"<a href="/" accesskey="h">Home</a>"#).len(), 1);
    }

    #[test]
    fn test_grouped_inputs() {
        let html = r#"
            <fieldset><legend>A</legend>
              <input type="radio" id="r1"><input type="radio" id="r2" name="g">
            </fieldset>
            <fieldset><legend>B</legend><input type="checkbox" id="solo"></fieldset>
        "#;
        let messages = run(&GROUPED_INPUTS_HAVE_NAME, html);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("INPUT element with id=\"r1\""));
    }

    #[test]
    fn test_radios_in_fieldset() {
        let html = r#"
            <fieldset><legend>A</legend><input type="radio" name="a"></fieldset>
            <div role="radiogroup"><input type="radio" name="b"></div>
            <input type="radio" name="c" id="loose">
        "#;
        let messages = run(&RADIOS_INSIDE_FIELDSET, html);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("id=\"loose\""));
    }

    #[test]
    fn test_slider_attributes() {
        let messages = run(&SLIDER_ROLE_HAS_REQUIRED_ATTRIBUTES, r#"<div role="slider" aria-valuenow="50"></div>"#);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("[aria-valuemin], [aria-valuemax]"));
        assert!(!messages[0].contains("[aria-valuenow]"));
        assert!(run(
            &SLIDER_ROLE_HAS_REQUIRED_ATTRIBUTES,
            r#"<div role="slider" aria-valuemin="0" aria-valuemax="100" aria-valuenow="5"></div>"#
        )
        .is_empty());
    }

    #[test]
    fn test_other_aria_roles() {
        assert_eq!(run(&SPINBUTTON_ROLE_HAS_REQUIRED_ATTRIBUTES, r#"<div role="spinbutton"></div>"#).len(), 1);
        let scroll = run(
            &SCROLLBAR_ROLE_HAS_REQUIRED_ATTRIBUTES,
            r#"<div role="scrollbar" aria-valuemin="0" aria-valuemax="10" aria-valuenow="1"></div>"#,
        );
        assert!(scroll[0].contains("[aria-controls], [aria-orientation]"));
        assert_eq!(run(&CHECKBOX_ROLE_HAS_REQUIRED_ATTRIBUTES, r#"<span role="checkbox"></span><span role="checkbox" aria-checked="false"></span>"#).len(), 1);
        assert_eq!(run(&COMBOBOX_ROLE_HAS_REQUIRED_ATTRIBUTES, r#"<input role="combobox" aria-label="City">"#).len(), 1);
    }

    #[test]
    fn test_nested_interactive() {
        let html = r#"
            <a href="/a"><button type="button">Bad</button></a>
            <button type="button"><a href="/b">Bad</a></button>
            <label>Name <input type="text"></label>
            <a href="/c"><span>Fine</span></a>
        "#;
        let messages = run(&NO_NESTED_INTERACTIVE, html);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("(<A>)"));
        assert!(messages[1].contains("(<BUTTON>)"));
    }

    #[test]
    fn test_media_controls_hold_no_interactive_content() {
        let html = r#"<audio controls src="a.mp3"><button type="button">Play</button></audio>"#;
        let messages = run(&NO_NESTED_INTERACTIVE, html);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("BUTTON element"));
        assert!(messages[0].contains("(<AUDIO>)"));

        let fallback = r#"<video src="v.mp4"><a href="v.mp4">Download</a></video>"#;
        assert!(run(&NO_NESTED_INTERACTIVE, fallback).is_empty());
    }

    #[test]
    fn test_label_may_wrap_its_control_only() {
        assert!(run(&NO_NESTED_INTERACTIVE, r#"<label>Name <input type="text"></label>"#).is_empty());
        let messages = run(&NO_NESTED_INTERACTIVE, r#"<label>Outer <label>Inner</label></label>"#);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("(<LABEL>)"));
    }
}
