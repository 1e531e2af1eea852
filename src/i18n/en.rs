//! English labels

pub const LABELS: &[(&str, &str)] = &[
    // App general
    ("app.title", "Appliance Cost Calculator"),

    // Breakdown table
    ("table.index", "#"),
    ("table.name", "Device"),
    ("table.count", "Count"),
    ("table.peak", "Peak"),
    ("table.off_peak", "Off-peak"),
    ("table.days", "Days"),
    ("table.weeks", "Weeks"),
    ("table.include", "Include"),
    ("table.daily", "Daily"),
    ("table.monthly", "Monthly"),
    ("table.annual", "Annual"),
    ("table.kwh_day", "kWh/day"),
    ("table.yes", "Yes"),
    ("table.no", "No"),
    ("table.empty", "No devices added yet"),

    // Totals
    ("totals.title", "Total electricity cost"),
    ("totals.daily", "Daily"),
    ("totals.monthly", "Monthly"),
    ("totals.annual", "Annual"),
    ("totals.devices", "Devices included"),

    // Rates
    ("rates.peak", "Peak rate"),
    ("rates.off_peak", "Off-peak rate"),

    // Chart
    ("chart.title", "Annual cost share"),
    ("chart.share", "Share"),
    ("chart.empty", "Nothing to chart"),

    // Calculation details
    ("details.title", "Calculation details"),
    ("details.avg_watts", "Average power"),
    ("details.avg_kw", "Average power (kW)"),
    ("details.scaling", "Usage scaling factor"),
    ("details.peak_hours", "Effective peak hours"),
    ("details.low_hours", "Effective off-peak hours"),
    ("details.peak_cost", "Peak cost per unit"),
    ("details.low_cost", "Off-peak cost per unit"),
    ("details.unit_cost", "Daily cost per unit"),
    ("details.count", "Units"),
    ("details.total_cost", "Daily cost"),
    ("details.unavailable", "Calculation not available"),

    // Catalog
    ("catalog.title", "Device types"),
    ("catalog.power", "Power (W)"),
    ("catalog.split", "Split (%)"),
    ("catalog.hours", "Peak / off-peak"),

    // Status
    ("status.exported", "Exported"),
];
