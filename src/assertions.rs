// SPDX-License-Identifier: PMPL-1.0-or-later
//! Assertion-style API: one function per rule.
//!
//! ```
//! use accessibility_checks::assertions::assert_images_have_alt;
//!
//! assert!(assert_images_have_alt(r#"<img src="logo.png" alt="Acme">"#).is_ok());
//!
//! let failure = assert_images_have_alt(r#"<img src="/x.png">"#).unwrap_err();
//! assert!(failure.to_string().contains("is missing the alt attribute"));
//! ```

use crate::dom::Document;
use crate::error::RuleFailure;
use crate::report;
use crate::rules::{advice, errors, obsoletes, warnings, Rule};
use crate::violation::Violation;

/// Run one rule; `Err` carries every offender in document order.
pub fn check_rule(rule: &Rule, html: &str) -> Result<(), Vec<Violation>> {
    let doc = Document::parse(html);
    let violations = rule.evaluate(&doc);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Run one rule; `Err` carries the rendered failure message.
pub fn assert_rule(rule: &Rule, html: &str) -> Result<(), RuleFailure> {
    check_rule(rule, html).map_err(|violations| RuleFailure {
        rule: rule.name,
        category: rule.category,
        message: report::render(rule, &violations).unwrap_or_default(),
        violations,
    })
}

macro_rules! assertions {
    ($($fn_name:ident => $rule:path),* $(,)?) => {
        $(
            #[doc = concat!("Assert the `", stringify!($rule), "` rule holds for `html`.")]
            pub fn $fn_name(html: &str) -> Result<(), RuleFailure> {
                assert_rule(&$rule, html)
            }
        )*
    };
}

assertions! {
    assert_no_insecure_urls => advice::NO_INSECURE_URLS,
    assert_th_scope_is_valid => advice::TH_SCOPE_IS_VALID,
    assert_no_placeholder_as_label => advice::NO_PLACEHOLDER_AS_LABEL,
    assert_unique_landmark_roles => advice::UNIQUE_LANDMARK_ROLES,
    assert_no_button_role_on_links => advice::NO_BUTTON_ROLE_ON_LINKS,
    assert_phone_links_are_valid => advice::PHONE_LINKS_ARE_VALID,
    assert_mailto_links_are_valid => advice::MAILTO_LINKS_ARE_VALID,
    assert_figcaption_position => advice::FIGCAPTION_POSITION,
    assert_single_visible_main => advice::SINGLE_VISIBLE_MAIN,
    assert_no_empty_id_or_class => advice::NO_EMPTY_ID_OR_CLASS,
    assert_required_select_has_empty_first_option => advice::REQUIRED_SELECT_HAS_EMPTY_FIRST_OPTION,

    assert_id_has_no_whitespace => errors::ID_HAS_NO_WHITESPACE,
    assert_lang_has_no_whitespace => errors::LANG_HAS_NO_WHITESPACE,
    assert_map_name_has_no_whitespace => errors::MAP_NAME_HAS_NO_WHITESPACE,
    assert_tabindex_not_positive => errors::TABINDEX_NOT_POSITIVE,
    assert_href_not_empty => errors::HREF_NOT_EMPTY,
    assert_interactive_elements_have_names => errors::INTERACTIVE_ELEMENTS_HAVE_NAMES,
    assert_images_have_alt => errors::IMAGES_HAVE_ALT,
    assert_img_role_has_label => errors::IMG_ROLE_HAS_LABEL,
    assert_images_have_valid_src => errors::IMAGES_HAVE_VALID_SRC,
    assert_label_for_not_empty => errors::LABEL_FOR_NOT_EMPTY,
    assert_form_fields_have_labels => errors::FORM_FIELDS_HAVE_LABELS,
    assert_button_inputs_have_value => errors::BUTTON_INPUTS_HAVE_VALUE,
    assert_buttons_have_type => errors::BUTTONS_HAVE_TYPE,
    assert_submit_attributes_only_on_submit => errors::SUBMIT_ATTRIBUTES_ONLY_ON_SUBMIT,
    assert_disabled_class_has_attribute => errors::DISABLED_CLASS_HAS_ATTRIBUTE,
    assert_inputs_have_type => errors::INPUTS_HAVE_TYPE,
    assert_optgroups_have_label => errors::OPTGROUPS_HAVE_LABEL,
    assert_iframes_have_title => errors::IFRAMES_HAVE_TITLE,
    assert_forms_have_action => errors::FORMS_HAVE_ACTION,
    assert_html_has_lang => errors::HTML_HAS_LANG,
    assert_presentation_tables_have_no_semantics => errors::PRESENTATION_TABLES_HAVE_NO_SEMANTICS,
    assert_width_height_allowed => errors::WIDTH_HEIGHT_ALLOWED,
    assert_no_inline_event_handlers => errors::NO_INLINE_EVENT_HANDLERS,
    assert_css_identifiers_are_valid => errors::CSS_IDENTIFIERS_ARE_VALID,
    assert_page_has_title => errors::PAGE_HAS_TITLE,
    assert_viewport_allows_zoom => errors::VIEWPORT_ALLOWS_ZOOM,
    assert_charset_is_utf8 => errors::CHARSET_IS_UTF8,
    assert_dir_attribute_is_valid => errors::DIR_ATTRIBUTE_IS_VALID,
    assert_no_accesskey => errors::NO_ACCESSKEY,
    assert_grouped_inputs_have_name => errors::GROUPED_INPUTS_HAVE_NAME,
    assert_radios_inside_fieldset => errors::RADIOS_INSIDE_FIELDSET,
    assert_slider_role_has_required_attributes => errors::SLIDER_ROLE_HAS_REQUIRED_ATTRIBUTES,
    assert_spinbutton_role_has_required_attributes => errors::SPINBUTTON_ROLE_HAS_REQUIRED_ATTRIBUTES,
    assert_scrollbar_role_has_required_attributes => errors::SCROLLBAR_ROLE_HAS_REQUIRED_ATTRIBUTES,
    assert_checkbox_role_has_required_attributes => errors::CHECKBOX_ROLE_HAS_REQUIRED_ATTRIBUTES,
    assert_combobox_role_has_required_attributes => errors::COMBOBOX_ROLE_HAS_REQUIRED_ATTRIBUTES,
    assert_no_nested_interactive => errors::NO_NESTED_INTERACTIVE,

    assert_no_obsolete_elements => obsoletes::NO_OBSOLETE_ELEMENTS,
    assert_no_obsolete_attributes => obsoletes::NO_OBSOLETE_ATTRIBUTES,

    assert_li_inside_list => warnings::LI_INSIDE_LIST,
    assert_dl_structure => warnings::DL_STRUCTURE,
    assert_dt_dd_inside_dl => warnings::DT_DD_INSIDE_DL,
    assert_figcaption_inside_figure => warnings::FIGCAPTION_INSIDE_FIGURE,
    assert_main_not_nested => warnings::MAIN_NOT_NESTED,
    assert_options_inside_select => warnings::OPTIONS_INSIDE_SELECT,
    assert_legend_inside_fieldset => warnings::LEGEND_INSIDE_FIELDSET,
    assert_address_content => warnings::ADDRESS_CONTENT,
    assert_no_block_in_inline => warnings::NO_BLOCK_IN_INLINE,
    assert_no_redundant_section_wrapper => warnings::NO_REDUNDANT_SECTION_WRAPPER,
    assert_legend_first_in_fieldset => warnings::LEGEND_FIRST_IN_FIELDSET,
    assert_summary_first_in_details => warnings::SUMMARY_FIRST_IN_DETAILS,
    assert_abbr_has_title => warnings::ABBR_HAS_TITLE,
    assert_alt_not_filename => warnings::ALT_NOT_FILENAME,
    assert_decorative_elements_have_no_name => warnings::DECORATIVE_ELEMENTS_HAVE_NO_NAME,
    assert_no_presentation_role_on_images => warnings::NO_PRESENTATION_ROLE_ON_IMAGES,
    assert_svg_has_role_or_hidden => warnings::SVG_HAS_ROLE_OR_HIDDEN,
    assert_media_no_autoplay => warnings::MEDIA_NO_AUTOPLAY,
    assert_media_has_controls => warnings::MEDIA_HAS_CONTROLS,
    assert_no_empty_elements => warnings::NO_EMPTY_ELEMENTS,
    assert_tables_do_not_nest => warnings::TABLES_DO_NOT_NEST,
    assert_table_has_caption => warnings::TABLE_HAS_CAPTION,
    assert_table_section_order => warnings::TABLE_SECTION_ORDER,
    assert_table_has_thead => warnings::TABLE_HAS_THEAD,
    assert_script_links_have_button_role => warnings::SCRIPT_LINKS_HAVE_BUTTON_ROLE,
    assert_heading_role_has_level => warnings::HEADING_ROLE_HAS_LEVEL,
    assert_labels_have_single_control => warnings::LABELS_HAVE_SINGLE_CONTROL,
    assert_dir_matches_lang => warnings::DIR_MATCHES_LANG,
    assert_rtl_lang_declares_dir => warnings::RTL_LANG_DECLARES_DIR,
    assert_nested_lang_declares_dir => warnings::NESTED_LANG_DECLARES_DIR,
}
