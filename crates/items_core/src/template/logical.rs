/// Derives a template logical id from name fragments.
///
/// Each fragment is split on non-alphanumeric characters and the pieces are
/// joined in PascalCase, so `["itemsApi", "{id}", "GET"]` becomes
/// `ItemsApiIdGET`. Logical ids may only contain `[A-Za-z0-9]`.
pub fn logical_id(parts: &[&str]) -> String {
    let mut id = String::new();
    for word in parts
        .iter()
        .flat_map(|part| part.split(|c: char| !c.is_ascii_alphanumeric()))
        .filter(|word| !word.is_empty())
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            id.push(first.to_ascii_uppercase());
            id.extend(chars);
        }
    }
    id
}
