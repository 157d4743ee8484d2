//! HTML templates, compiled into the binary.

use tera::Tera;

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("giftlist.html", include_str!("../templates/giftlist.html")),
    ("addgift.html", include_str!("../templates/addgift.html")),
];

pub fn load() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES)?;
    Ok(tera)
}
