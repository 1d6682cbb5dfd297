const DEFAULTS: &str = "src/default_settings.toml";
const SECTIONS: [&str; 3] = ["filter", "autocomplete", "store"];

fn main() {
    println!("cargo:rerun-if-changed={DEFAULTS}");
    let table = match include_str!("src/default_settings.toml").parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("{DEFAULTS} is not valid TOML: {e}"),
    };
    for section in SECTIONS {
        if !table.get(section).is_some_and(toml::Value::is_table) {
            panic!("{DEFAULTS} is missing the [{section}] table");
        }
    }
}
