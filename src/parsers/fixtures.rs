// Sample SoC Watch exports used by the parser and command tests

pub const LEGACY_TWO_CORE: &str = "\
SoC Watch for Windows v2023.2
Collection duration (sec): 120.5
CPU Base Operating Frequency (MHz): 3000
Total # of cores: 2
Package_0/Core_0 = LNC
Package_0/Core_1 = SKT

Core C-State Summary: Residency (Percentage and Time)
State, Core_0 (%), Core_1 (%)
------, ------, ------
CC0/CC1, 62.5, 30.0
CC6, 20.0, 50.0
CC7, 17.5, 20.0

Core C-State Summary: Total Samples
State, Core_0, Core_1
CC0/CC1, 1250, 600

CPU P-State Average Frequency (excluding CPU idle time)
Core, Average Frequency (MHz)
Package_0/Core_0, 4200
Package_0/Core_1, 2800

CPU P-State/Frequency Summary
";

pub const COMPREHENSIVE_FOUR_CORE: &str = "\
SoC Watch for Windows v2024.1
Data Collection Started: 2024-06-01 14:22:05
CPU: Intel(R) Core(TM) Ultra 7 268V
Collection duration (sec): 60.0
CPU Base Operating Frequency (MHz): 2200
Total # of cores: 4
Package_0/Core_0 = CGC (P Core)
Package_0/Core_1 = CGC (P Core)
Package_0/Core_2 = DKT (E Core)
Package_0/Core_3 = DKT (LPE Core)

Core C-State Summary: Residency (Percentage and Time)
State, Core_0, Core_1, Core_2, Core_3
-----, ------, ------, ------, ------
CC0, 40.0, 30.0, 10.0, 5.0
CC1, 5.0, 5.0, 2.0, 1.0
CC6, 25.0, 35.0, 48.0, 54.0
CC7, 30.0, 30.0, 40.0, 40.0

Core C-State Summary: Total Samples
State, Core_0, Core_1, Core_2, Core_3
CC0, 400, 300, 100, 50

CPU P-State Average Frequency (excluding CPU idle time)
Core, Frequency (MHz)
Package_0/Core_0, 4500
Package_0/Core_1, 4300
Package_0/Core_2, 2900
Package_0/Core_3, 2100

Package C-State Summary: Residency (Percentage and Time)
State, Residency (%), Time (ms)
-----, ------, ------
PC0, 35.5, 21300
PC2, 4.5, 2700
PC6, 20.0, 12000
PC10, 40.0, 24000

PCD SLP-S0 State Summary: Residency (Percentage and Time)
State, Residency (%)
SLP-S0, 12.5
s0i2.0, 8.0
s0i2.1, 3.0
s0i2.2, 1.5

Package Wakeups (OS) Summary: Type Count
Type, Count
----, -----
Timer, 1520
Interrupt, 830
IPI, 95

Package Power Summary: Average Rate and Total
Component, Average Rate (mW), Total (mJ)
CPU/Package_0 Power , 15250, 915000

Temperature Metrics Summary - Sampled: Min/Max/Avg
Component, Min, Max, Avg
CPU/Package_0/Core_0, 45, 88, 60
CPU/Package_0/Core_1, 46, 90, 65
CPU/Package_0/Core_2, 40, 80, 70
CPU/Package_0/Core_3, 41, 85, 75

CPU-iGPU Concurrency Summary: Residency (Percentage and Time)
State, Residency (%)
CPU Only, 40
iGPU Only, 10
Both, 20

CPU-iGPU Concurrency Summary: Total Samples
";

/// Legacy export with `cores` cores alternating P/E declarations
pub fn legacy_trace(cores: u32) -> String {
    let mut text = String::from("Collection duration (sec): 30\n");
    text.push_str(&format!("Total # of cores: {}\n", cores));
    for core in 0..cores {
        let code = if core % 2 == 0 { "LNC" } else { "SKT" };
        text.push_str(&format!("Package_0/Core_{} = {}\n", core, code));
    }

    let header: Vec<String> = (0..cores).map(|c| format!("Core_{}", c)).collect();
    text.push_str("\nCore C-State Summary: Residency (Percentage and Time)\n");
    text.push_str(&format!("State, {}\n", header.join(", ")));
    text.push_str("-----\n");
    for (state, base) in [("CC0/CC1", 20.0), ("CC6", 50.0), ("CC7", 30.0)] {
        let values: Vec<String> = (0..cores).map(|c| format!("{:.1}", base + c as f64)).collect();
        text.push_str(&format!("{}, {}\n", state, values.join(", ")));
    }
    text.push('\n');
    text
}

/// Drop every line from the one containing `banner` up to the next blank line
pub fn without_section(text: &str, banner: &str) -> String {
    let mut skipping = false;
    let mut kept = Vec::new();
    for line in text.split('\n') {
        if line.contains(banner) {
            skipping = true;
        }
        if skipping {
            if line.trim().is_empty() {
                skipping = false;
            } else {
                continue;
            }
        }
        kept.push(line);
    }
    kept.join("\n")
}
