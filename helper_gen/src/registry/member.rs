use super::MemberDecl;
use roxmltree::Node;

/* Splits a `<member>` into its tokens. Mixed content looks like
 * `const <type>char</type>* const* <name>ppNames</name>`; the qualifier tails
 * are the text runs that directly follow a child element. */
pub(super) fn member_decl(node: Node<'_, '_>) -> MemberDecl {
    let mut decl = MemberDecl {
        len: node.attribute("len").map(str::to_string),
        valid_extension_structs: node.attribute("validextensionstructs").map(str::to_string),
        ..MemberDecl::default()
    };
    let mut rendered = String::new();

    for child in node.children() {
        if child.is_text() {
            let text = child.text().unwrap_or_default();
            if child.prev_sibling().is_some_and(|prev| prev.is_element()) {
                decl.qualifier_tail.push(text.to_string());
            }
            rendered.push_str(text);
        } else if child.is_element() {
            let text = child.text().map(str::trim).unwrap_or_default();
            match child.tag_name().name() {
                "type" => decl.type_token = non_empty(text),
                "name" => decl.name_token = non_empty(text),
                "comment" => continue,
                _ => {}
            }
            rendered.push_str(text);
        }
    }

    decl.declaration = rendered.split_whitespace().collect::<Vec<_>>().join(" ");
    decl
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}
