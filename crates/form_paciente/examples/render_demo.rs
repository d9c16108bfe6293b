use anyhow::Result;
use form_paciente::*;

fn main() -> Result<()> {
    env_logger::init();

    // Usage: render_demo [PATIENT_JSON] [UNIT]
    let mut args = std::env::args().skip(1);
    let patient_json = args.next().unwrap_or_else(|| r#"{"nome": "Maria Oliveira", "leito": "4"}"#.to_string());
    let unit = args.next().unwrap_or_else(|| UTI.to_string());

    println!("🏥 Registration form demo");
    println!("  Patient data: {}", patient_json);

    let mut doc = MemoryDocument::registration_page(Some(&patient_json), &unit);
    let report = initialize(&mut doc);
    println!(
        "🔌 Wired bed field: {}, date mask: {}",
        report.bed_field_wired, report.date_mask_wired
    );

    let mut units = vec![unit];
    units.extend(known_units().into_iter().map(String::from));
    units.push("2ª Enfermaria".to_string());

    for unit in &units {
        doc.select_option("unidade", unit)?;
        println!("\n🛏️  Unit {:?}", unit);
        println!("  Bed value: {:?}", doc.value(BED_FIELD_ID)?);
        println!("  {}", doc.inner_html("leito-container").unwrap_or_default());
    }

    println!("\n📅 Typing a birth date");
    for keystroke in "31a0119905".chars() {
        doc.type_text("data_nascimento", &keystroke.to_string())?;
        println!("  {:?} -> {}", keystroke, doc.value("data_nascimento")?);
    }

    Ok(())
}
