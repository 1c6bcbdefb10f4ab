//! The CES component maintenance report sample contract.

use crate::model::{Block, ContractDocument, Section, Table, TitleBlock};
use crate::style::TableStyle;

/// Contract number printed in section 1 and encoded in the output file name.
pub const CONTRACT_NUMBER: &str = "CMR-2024-GEA-CES-0042";

/// File name of the generated sample.
pub const OUTPUT_FILE_NAME: &str = "ces-cmr-2024-0042.pdf";

const CONTRACT_INFORMATION: &[(&str, &str)] = &[
    ("Contract Number:", CONTRACT_NUMBER),
    ("Work Order Number:", "WO-GEA-2024-108754"),
    (
        "Contract Type:",
        "Time & Material (T&M) \u{2014} Engine Shop Visit",
    ),
    ("Contract Date:", "March 15, 2024"),
    (
        "Effective Period:",
        "March 15, 2024 \u{2013} September 15, 2024",
    ),
];

const PARTIES: &[(&str, &str)] = &[
    (
        "Service Provider:",
        "GE Aerospace Engine Services (CES), Cincinnati, OH 45215, USA",
    ),
    ("Customer / Airline Operator:", "American Airlines, Inc."),
    (
        "Customer Contact:",
        "James T. Wilson, Director of Engineering",
    ),
    (
        "Station Location:",
        "GE CES MRO \u{2013} Cincinnati, Ohio (CVG)",
    ),
];

const AIRCRAFT_AND_ENGINE: &[(&str, &str)] = &[
    ("Aircraft Type:", "Boeing 737-800"),
    ("Aircraft Registration:", "N951AA"),
    ("Engine Model:", "CFM56-7B27"),
    ("Engine Serial Number:", "896-427"),
    ("Engine Position:", "#1 (Left Wing)"),
    ("Total Time Since New (TTSN):", "28,450 FH / 19,820 FC"),
    ("Shop Visit Date:", "March 20, 2024"),
];

const SCOPE_OF_WORK: &[[&str; 3]] = &[
    ["Task", "Description", "ATA Chapter"],
    [
        "HPC Blade Replacement",
        "Replace Stage 3-9 HPC blades, blend limits exceeded",
        "72-30",
    ],
    [
        "HPT Nozzle Repair",
        "Braze repair on Stage 1 HPT nozzle segments",
        "72-60",
    ],
    [
        "Combustor Inspection",
        "Borescope + dimensional check, liner replacement",
        "72-40",
    ],
    [
        "LPT Rotor Overhaul",
        "Full teardown, disk inspection, blade re-coat",
        "72-50",
    ],
    [
        "FADEC Software Update",
        "Software update to version 5.2.7",
        "73-20",
    ],
];

const FINANCIALS: &[(&str, &str)] = &[
    ("Labor Charges:", "$1,245,000.00 USD"),
    ("Parts & Materials:", "$3,892,500.00 USD"),
    ("TAT Penalty Waiver:", "($45,000.00) USD"),
    ("Total Contract Value:", "$5,092,500.00 USD"),
    ("Currency:", "USD"),
    ("Return to Service Date:", "August 30, 2024"),
];

const SIGNATURES: &[[&str; 2]] = &[
    [
        "GE Aerospace CES \u{2014} Authorized Representative",
        "Customer \u{2014} Authorized Signatory",
    ],
    ["\n\n\n", "\n\n\n"],
    [
        "Sarah M. Chen, VP \u{2013} MRO Operations",
        "James T. Wilson, Director of Engineering",
    ],
];

fn scope_table() -> Table {
    SCOPE_OF_WORK.iter().fold(
        Table::new(vec![45.0, 90.0, 25.0], TableStyle::scope_of_work()),
        |table, row| table.with_row(*row),
    )
}

fn signature_table() -> Table {
    SIGNATURES.iter().fold(
        Table::new(vec![85.0, 85.0], TableStyle::signatures()),
        |table, row| table.with_row(*row),
    )
}

/// Builds the sample maintenance contract.
pub fn sample_contract() -> ContractDocument {
    let title = TitleBlock::new("GE AEROSPACE ENGINE SERVICES")
        .with_subtitle(
            "Component Maintenance Report (CMR) \u{2014} Maintenance Contract Agreement",
        )
        .with_subtitle("Document Ref: GEA-CES-CMR-2024-0042  |  Classification: CONFIDENTIAL");

    ContractDocument::new(
        format!("Component Maintenance Report {CONTRACT_NUMBER}"),
        title,
    )
    .with_section(Section::new(1, "Contract Information").with_fields(CONTRACT_INFORMATION))
    .with_section(Section::new(2, "Parties").with_fields(PARTIES))
    .with_section(Section::new(3, "Aircraft & Engine Details").with_fields(AIRCRAFT_AND_ENGINE))
    .with_section(
        Section::new(4, "Scope of Work")
            .with_block(Block::paragraph(
                "Work Scope: Performance Restoration Shop Visit (PRSV)",
            ))
            .with_block(Block::Table(scope_table()))
            .with_space_after_pt(8.0),
    )
    .with_section(
        Section::new(5, "Financials")
            .with_fields(FINANCIALS)
            .with_space_after_pt(8.0),
    )
    .with_section(
        Section::new(6, "Authorizations")
            .with_heading_gap_pt(8.0)
            .with_block(Block::Table(signature_table()))
            .with_space_after_pt(0.0),
    )
}
