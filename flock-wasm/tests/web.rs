#![cfg(target_arch = "wasm32")]

use flock_wasm::FlockSimulation;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_canvas(id: &str) {
    let document = web_sys::window()
        .expect("no global window")
        .document()
        .expect("no document");
    let canvas = document
        .create_element("canvas")
        .expect("create canvas")
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .expect("canvas element");
    canvas.set_id(id);
    document
        .body()
        .expect("no body")
        .append_child(&canvas)
        .expect("append canvas");
}

#[wasm_bindgen_test]
fn population_follows_canvas_area() {
    mount_canvas("flock-population");
    let mut sim = FlockSimulation::new("flock-population", 600.0, 500.0, "classic").unwrap();
    assert_eq!(sim.agent_count(), 100);

    sim.resize(300.0, 500.0).unwrap();
    assert_eq!(sim.agent_count(), 50);

    sim.add_agent_at(10.0, 10.0).unwrap();
    assert_eq!(sim.agent_count(), 51);
}

#[wasm_bindgen_test]
fn frames_are_rate_limited() {
    mount_canvas("flock-frames");
    let mut sim = FlockSimulation::from_settings(
        "flock-frames",
        r#"{ "width": 200, "height": 200, "fps": 50, "seed": 4 }"#,
    )
    .unwrap();

    assert!(sim.frame(0.0).unwrap());
    assert!(!sim.frame(10.0).unwrap());
    assert!(sim.frame(25.0).unwrap());
    assert_eq!(sim.ticks(), 2);
}

#[wasm_bindgen_test]
fn rejects_bad_tuning() {
    mount_canvas("flock-tuning");
    let mut sim = FlockSimulation::new("flock-tuning", 200.0, 200.0, "swarm").unwrap();
    assert!(sim.set_speed_limit(0.0).is_err());
    assert!(sim.set_cohesion_weight(0.01).is_ok());
    assert!(sim.set_preset("flamingo").is_err());
    assert!(sim.set_preset("school").is_ok());
    sim.set_pointer(100.0, 100.0);
    assert!(sim.status_json().unwrap().contains("\"pointer_active\":true"));
}
