#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // no console in release

use std::sync::mpsc;

use card_grid_drag::{
    CardGridView, CardToken, ControllerOptions, DragController, GridLayout, RetainedSurface,
    ServerMessage,
};
use eframe::egui;

const SUITS: [&str; 4] = ["S", "H", "D", "C"];
const RANKS: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

/// Gaps-style deal: every ace is replaced by a blank of its suit.
fn deal(layout: &GridLayout) -> RetainedSurface {
    let tokens = SUITS.iter().flat_map(|suit| {
        RANKS.iter().map(move |rank| {
            if *rank == "A" {
                format!("{}:{suit}", CardToken::BLANK)
            } else {
                format!("{rank}:{suit}")
            }
        })
    });
    RetainedSurface::from_tokens(layout, tokens)
}

/// Stands in for the game server: owns the authoritative grid and re-renders it.
struct ToyServer {
    rx: mpsc::Receiver<ServerMessage>,
    in_flight: Option<CardToken>,
    history: Vec<String>,
}

impl ToyServer {
    fn pump(&mut self, surface: &mut RetainedSurface) {
        for message in self.rx.try_iter() {
            match &message {
                ServerMessage::SwapRequest(swap) => {
                    if let Err(err) = surface.swap(swap.source_slot, swap.target_slot) {
                        log::warn!("server rejected swap: {err}");
                    }
                }
                ServerMessage::DraggedCard { card_token } => {
                    self.in_flight.clone_from(card_token);
                }
                _ => {}
            }
            self.history.push(format!("{message:?}"));
        }
    }
}

struct App {
    controller: DragController<mpsc::Sender<ServerMessage>>,
    surface: RetainedSurface,
    view: CardGridView,
    server: ToyServer,
}

impl App {
    fn new() -> Self {
        let layout = GridLayout::default();
        let surface = deal(&layout);
        let (tx, rx) = mpsc::channel();
        let options = ControllerOptions {
            debug_event_log: true,
            ..Default::default()
        };
        Self {
            controller: DragController::new_with_options(layout, tx, options),
            surface,
            view: CardGridView::new("demo_grid"),
            server: ToyServer {
                rx,
                in_flight: None,
                history: Vec::new(),
            },
        }
    }

    fn redeal(&mut self) {
        self.surface = deal(self.controller.layout());
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let options = &mut self.controller.options;
                ui.checkbox(&mut options.optimistic_source_blank, "Blank source while dragging");
                ui.checkbox(&mut options.click_to_swap, "Click to swap");
                if ui.button("Re-deal").clicked() {
                    self.redeal();
                }
                match &self.server.in_flight {
                    Some(token) => ui.label(format!("In flight: {token}")),
                    None => ui.label("In flight: -"),
                };
            });
        });

        egui::SidePanel::right("log")
            .default_width(360.0)
            .show(ctx, |ui| {
                ui.heading("Server inbox");
                egui::ScrollArea::vertical()
                    .id_salt("inbox")
                    .max_height(ui.available_height() * 0.5)
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &self.server.history {
                            ui.monospace(line);
                        }
                    });
                ui.separator();
                ui.horizontal(|ui| {
                    ui.heading("Controller log");
                    if ui.button("Clear").clicked() {
                        self.controller.debug_log_clear();
                    }
                });
                egui::ScrollArea::vertical()
                    .id_salt("debug_log")
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        ui.monospace(self.controller.debug_log_text());
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.view.show(ui, &mut self.controller, &mut self.surface);
        });

        self.server.pump(&mut self.surface);
    }
}

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 560.0])
            .with_title("card_grid_drag: demo"),
        ..Default::default()
    };
    eframe::run_native(
        "card_grid_drag: demo",
        options,
        Box::new(|_cc| Ok(Box::new(App::new()))),
    )
}
