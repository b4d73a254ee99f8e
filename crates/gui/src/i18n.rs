use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Ru,
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=En (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::Ru,
        _ => Lang::En,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::En => 0,
            Lang::Ru => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if ru { "Файл" } else { "File" },
        "menu.open" => if ru { "Открыть многогранник..." } else { "Open payload..." },
        "menu.open_title" => if ru { "Открыть JSON многогранника" } else { "Open Payload JSON" },
        "menu.snapshot" => if ru { "Сохранить снимок (SVG)..." } else { "Save snapshot (SVG)..." },
        "menu.snapshot_title" => if ru { "Сохранить снимок" } else { "Save Snapshot" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.shapes" => if ru { "Фигуры" } else { "Shapes" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.display_panel" => if ru { "Панель отображения" } else { "Display panel" },
        "menu.reset_camera" => if ru { "Сбросить камеру  R" } else { "Reset camera  R" },
        "menu.fit" => if ru { "Вписать  F" } else { "Fit to view  F" },
        "menu.zoom_in" => if ru { "Приблизить  +" } else { "Zoom in  +" },
        "menu.zoom_out" => if ru { "Отдалить  -" } else { "Zoom out  -" },
        "menu.language" => if ru { "Язык" } else { "Language" },

        // ── Layers ──────────────────────────────────────────
        "layer.faces" => if ru { "Грани" } else { "Faces" },
        "layer.edges" => if ru { "Рёбра" } else { "Edges" },
        "layer.vertices" => if ru { "Вершины" } else { "Vertices" },
        "layer.labels" => if ru { "Подписи" } else { "Labels" },
        "layer.axes" => if ru { "Оси" } else { "Axes" },
        "layer.insphere" => if ru { "Вписанная сфера" } else { "Inscribed sphere" },
        "layer.midsphere" => if ru { "Средняя сфера" } else { "Midsphere" },
        "layer.circumsphere" => if ru { "Описанная сфера" } else { "Circumscribed sphere" },
        "layer.dual" => if ru { "Двойственный" } else { "Dual" },

        // ── Measurement ─────────────────────────────────────
        "measure.mode" => if ru { "Режим измерения  M" } else { "Measure mode  M" },
        "measure.clear" => if ru { "Очистить  Esc" } else { "Clear  Esc" },
        "measure.perimeter" => if ru { "Периметр" } else { "Perimeter" },
        "measure.length" => if ru { "Длина" } else { "Length" },
        "measure.area" => if ru { "Площадь" } else { "Area" },
        "measure.volume" => if ru { "Объём" } else { "Volume" },
        "measure.lateral" => if ru { "Боковая пов." } else { "Lateral area" },
        "measure.total" => if ru { "Полная пов." } else { "Total area" },
        "measure.angles" => if ru { "Углы" } else { "Angles" },
        "measure.last" => if ru { "Последний отрезок" } else { "Last segment" },

        // ── Panels / status ─────────────────────────────────
        "panel.display" => if ru { "Отображение" } else { "Display" },
        "panel.measurement" => if ru { "Измерение" } else { "Measurement" },
        "panel.shape" => if ru { "Фигура" } else { "Shape" },
        "status.vertices" => if ru { "Вершин" } else { "Vertices" },
        "status.faces" => if ru { "Граней" } else { "Faces" },
        "status.selected" => if ru { "Выбрано" } else { "Selected" },
        "hint.nav" => if ru {
            "ЛКМ — вращение, Shift/СКМ — сдвиг, колесо — масштаб"
        } else {
            "LMB drag orbit, Shift/MMB drag pan, wheel zoom"
        },
        "hint.measure" => if ru {
            "Клик — вершина, клик по первой — замкнуть, ПКМ — отмена"
        } else {
            "Click vertices, click the first to close, RMB to undo"
        },
        "hint.apex" => if ru { "Клик вне контура — вершина пирамиды" } else { "Click outside the loop to set an apex" },

        _ => "???",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key() {
        assert_ne!(t("measure.area"), "???");
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(t("no.such.key"), "???");
    }
}
