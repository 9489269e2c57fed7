//! Person Links
//!
//! `.person-list` elements hold names joined with ` & `; each name becomes a
//! link to its person page. `<person-name>` elements render as a heading.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom;

/// Separator between names
pub const NAME_SEPARATOR: &str = " & ";

/// Characters escaped in a path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub fn attach_person_lists() {
    for el in dom::query_all(".person-list") {
        let text = match el.dyn_ref::<HtmlElement>() {
            Some(html) => html.inner_text(),
            None => el.text_content().unwrap_or_default(),
        };
        el.set_inner_html(&person_list_html(&text));
    }
}

pub fn attach_person_names() {
    for el in dom::query_all("person-name") {
        let id = el.get_attribute("id").unwrap_or_default();
        let name = el.get_attribute("name").unwrap_or_default();
        let print = el.get_attribute("print").is_some_and(|p| p == "1");
        el.set_inner_html(&person_heading_html(&id, &name, print));
    }
}

/// `<a href="/person/<name>">name</a>`
pub fn person_link(name: &str) -> String {
    format!(
        r#"<a href="/person/{}">{}</a>"#,
        utf8_percent_encode(name, PATH_SEGMENT),
        escape_html(name)
    )
}

/// Links for every name in `A & B & C`, joined the same way.
pub fn person_list_html(text: &str) -> String {
    text.split(NAME_SEPARATOR)
        .map(person_link)
        .collect::<Vec<_>>()
        .join(&escape_html(NAME_SEPARATOR))
}

/// Heading for `<person-name>`: a link to `/person/<id>`, or the plain name
/// on print pages.
pub fn person_heading_html(id: &str, name: &str, print: bool) -> String {
    let inner = if print {
        escape_html(name)
    } else {
        format!(
            r#"<a href="/person/{}">{}</a>"#,
            utf8_percent_encode(id, PATH_SEGMENT),
            escape_html(name)
        )
    };
    format!("<h3>{}</h3>", inner)
}

/// Escape HTML special characters
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_name() {
        assert_eq!(
            person_list_html("Tove Jansson"),
            r#"<a href="/person/Tove%20Jansson">Tove Jansson</a>"#
        );
    }

    #[test]
    fn test_names_joined_with_ampersand() {
        assert_eq!(
            person_list_html("Arkady Strugatsky & Boris Strugatsky"),
            concat!(
                r#"<a href="/person/Arkady%20Strugatsky">Arkady Strugatsky</a>"#,
                " &amp; ",
                r#"<a href="/person/Boris%20Strugatsky">Boris Strugatsky</a>"#
            )
        );
    }

    #[test]
    fn test_name_is_escaped() {
        assert_eq!(
            person_link("<b>"),
            r#"<a href="/person/%3Cb%3E">&lt;b&gt;</a>"#
        );
    }

    #[test]
    fn test_person_heading() {
        assert_eq!(
            person_heading_html("12", "Mika Waltari", false),
            r#"<h3><a href="/person/12">Mika Waltari</a></h3>"#
        );
        assert_eq!(
            person_heading_html("12", "Mika Waltari", true),
            "<h3>Mika Waltari</h3>"
        );
    }
}
