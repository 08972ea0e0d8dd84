use super::lang_resolver::SEXP;

pub fn run() {
    let langs = code2text_langs::all();
    println!("Supported languages ({}):", langs.len() + 1);
    for lang in langs {
        println!("  {}", lang.name());
    }
    println!("  {SEXP}");
}
