use quiz_session::QuizApp;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    pretty_env_logger::init();

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Quiz",
        options,
        Box::new(|cc| Ok(Box::new(QuizApp::new(cc)))),
    )
}

// ===== SOLO PARA WEB =====
#[cfg(target_arch = "wasm32")]
fn main() {
    use wasm_bindgen::JsCast;

    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("quiz_canvas")
            .expect("Falta el canvas #quiz_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("#quiz_canvas no es un canvas");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(QuizApp::new(cc)))),
            )
            .await;

        if let Err(err) = start_result {
            log::error!("no se pudo arrancar eframe: {err:?}");
        }
    });
}
