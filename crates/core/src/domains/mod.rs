//! Report domains
//!
//! Each module declares the static [`Schema`] for one backend table. The
//! [`Domain`] enum is the user-facing handle; its string form is the table
//! name.

pub mod address_assignments;
pub mod calls;
pub mod cause_analysis;
pub mod claims;
pub mod cycle_control;
pub mod daily_schedule;
pub mod deliveries;
pub mod digital_results;
pub mod invoice_staging;
pub mod processed_cycles;
pub mod readings;
pub mod returns;
pub mod review_analysis;
pub mod reviews;
pub mod smart_meter;

use crate::report::Schema;

/// Every report table the dashboard knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Readings,
    Reviews,
    Deliveries,
    Claims,
    Returns,
    AddressAssignments,
    CauseAnalysis,
    ReviewAnalysis,
    ProcessedCycles,
    Calls,
    InvoiceStaging,
    SmartMeterReports,
    DailySchedule,
    DigitalResults,
}

opsboard_domain::impl_domain_status_conversions!(Domain {
    Readings => "lecturas",
    Reviews => "revisiones",
    Deliveries => "repartos",
    Claims => "reclamos",
    Returns => "devoluciones",
    AddressAssignments => "nomenclatura",
    CauseAnalysis => "analisis_causas",
    ReviewAnalysis => "analisis_revisiones",
    ProcessedCycles => "ciclos_procesados",
    Calls => "llamadas",
    InvoiceStaging => "alistamiento_facturas",
    SmartMeterReports => "ami_reportes",
    DailySchedule => "programacion_actividades",
    DigitalResults => "resultados_digitales",
});

impl Domain {
    pub fn schema(self) -> &'static Schema {
        match self {
            Self::Readings => &readings::SCHEMA,
            Self::Reviews => &reviews::SCHEMA,
            Self::Deliveries => &deliveries::SCHEMA,
            Self::Claims => &claims::SCHEMA,
            Self::Returns => &returns::SCHEMA,
            Self::AddressAssignments => &address_assignments::SCHEMA,
            Self::CauseAnalysis => &cause_analysis::SCHEMA,
            Self::ReviewAnalysis => &review_analysis::SCHEMA,
            Self::ProcessedCycles => &processed_cycles::SCHEMA,
            Self::Calls => &calls::SCHEMA,
            Self::InvoiceStaging => &invoice_staging::SCHEMA,
            Self::SmartMeterReports => &smart_meter::SCHEMA,
            Self::DailySchedule => &daily_schedule::SCHEMA,
            Self::DigitalResults => &digital_results::SCHEMA,
        }
    }
}
