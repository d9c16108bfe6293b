//! Browser tests: `wasm-pack test --headless --firefox crates/form_paciente_web`
#![cfg(target_arch = "wasm32")]

use form_paciente::{FormDocument, initialize};
use form_paciente_web::WebDocument;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, HtmlSelectElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn registration_page(patient_json: &str, unit: &str) -> WebDocument {
    let document = document();
    document.body().unwrap().set_inner_html(&format!(
        r#"<div class="form-container" data-paciente='{patient_json}'>
             <select id="unidade" name="unidade">
               <option value="">Selecione</option>
               <option value="1ª Enfermaria">1ª Enfermaria</option>
               <option value="UTI">UTI</option>
               <option value="2ª Enfermaria">2ª Enfermaria</option>
             </select>
             <div id="leito-container"></div>
             <input type="text" id="data_nascimento" name="data_nascimento">
           </div>"#
    ));
    let mut doc = WebDocument::new(document);
    doc.set_value("unidade", unit).unwrap();
    doc
}

fn fire(id: &str, event: &str) {
    let target = document().get_element_by_id(id).unwrap();
    target.dispatch_event(&Event::new(event).unwrap()).unwrap();
}

fn bed_tag() -> String {
    document().get_element_by_id("leito").unwrap().tag_name().to_lowercase()
}

fn bed_option_count() -> u32 {
    document()
        .get_element_by_id("leito")
        .unwrap()
        .dyn_into::<HtmlSelectElement>()
        .unwrap()
        .length()
}

#[wasm_bindgen_test]
fn unit_change_swaps_select_and_input() {
    let mut doc = registration_page(r#"{"leito": "4", "idade": ""}"#, "UTI");
    let report = initialize(&mut doc);
    assert!(report.bed_field_wired);
    assert_eq!(bed_tag(), "select");
    assert_eq!(bed_option_count(), 6);
    assert_eq!(doc.value("leito").unwrap(), "4");

    doc.set_value("unidade", "2ª Enfermaria").unwrap();
    fire("unidade", "change");
    assert_eq!(bed_tag(), "input");
    assert_eq!(doc.value("leito").unwrap(), "4");

    doc.set_value("unidade", "1ª Enfermaria").unwrap();
    fire("unidade", "change");
    assert_eq!(bed_tag(), "select");
    assert_eq!(bed_option_count(), 14);

    let container = document().get_element_by_id("leito-container").unwrap();
    assert_eq!(container.child_element_count(), 1);
}

#[wasm_bindgen_test]
fn input_event_masks_birth_date() {
    let mut doc = registration_page("null", "");
    let report = initialize(&mut doc);
    assert!(report.date_mask_wired);

    doc.set_value("data_nascimento", "01a01/2020").unwrap();
    fire("data_nascimento", "input");
    assert_eq!(doc.value("data_nascimento").unwrap(), "01/01/2020");
}
