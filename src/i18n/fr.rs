//! French labels

pub const LABELS: &[(&str, &str)] = &[
    // App general
    ("app.title", "Calculateur de co\u{00FB}t des appareils"),

    // Breakdown table
    ("table.index", "#"),
    ("table.name", "Appareil"),
    ("table.count", "Nombre"),
    ("table.peak", "Pleines"),
    ("table.off_peak", "Creuses"),
    ("table.days", "Jours"),
    ("table.weeks", "Semaines"),
    ("table.include", "Inclus"),
    ("table.daily", "Jour"),
    ("table.monthly", "Mois"),
    ("table.annual", "Ann\u{00E9}e"),
    ("table.kwh_day", "kWh/jour"),
    ("table.yes", "Oui"),
    ("table.no", "Non"),
    ("table.empty", "Aucun appareil pour l'instant"),

    // Totals
    ("totals.title", "Co\u{00FB}t total d'\u{00E9}lectricit\u{00E9}"),
    ("totals.daily", "Par jour"),
    ("totals.monthly", "Par mois"),
    ("totals.annual", "Par an"),
    ("totals.devices", "Appareils inclus"),

    // Rates
    ("rates.peak", "Tarif heures pleines"),
    ("rates.off_peak", "Tarif heures creuses"),

    // Chart
    ("chart.title", "R\u{00E9}partition du co\u{00FB}t annuel"),
    ("chart.share", "Part"),
    ("chart.empty", "Rien \u{00E0} afficher"),

    // Calculation details
    ("details.title", "D\u{00E9}tail du calcul"),
    ("details.avg_watts", "Puissance moyenne"),
    ("details.avg_kw", "Puissance moyenne (kW)"),
    ("details.scaling", "Facteur d'utilisation"),
    ("details.peak_hours", "Heures pleines effectives"),
    ("details.low_hours", "Heures creuses effectives"),
    ("details.peak_cost", "Co\u{00FB}t heures pleines par unit\u{00E9}"),
    ("details.low_cost", "Co\u{00FB}t heures creuses par unit\u{00E9}"),
    ("details.unit_cost", "Co\u{00FB}t journalier par unit\u{00E9}"),
    ("details.count", "Unit\u{00E9}s"),
    ("details.total_cost", "Co\u{00FB}t journalier"),
    ("details.unavailable", "Calcul indisponible"),

    // Catalog
    ("catalog.title", "Types d'appareils"),
    ("catalog.power", "Puissance (W)"),
    ("catalog.split", "R\u{00E9}partition (%)"),
    ("catalog.hours", "Pleines / creuses"),

    // Status
    ("status.exported", "Export\u{00E9}"),
];
