use wasm_bindgen::prelude::*;
use trace_engine::*;

mod game;
mod letters;
mod manifest;
use game::LetterTracing;

trace_web::export_game!(LetterTracing, "letter-tracing");
