//! Acid-base and oxygenation diagnostic engine.
//!
//! A decision tree over the pH/pCO2/HCO3 triad, layered with anion gap,
//! delta-delta, lactate and oxygenation findings. Primary disturbances are
//! non-exclusive across axes: a respiratory and a metabolic disorder may
//! coexist (mixed disorder), but the tree never claims two primaries on
//! the same axis. Any sub-step with missing inputs is skipped silently;
//! the engine never errors on missing data.

use cdss_calc::{
    CompensationStatus, anion_gap, anion_gap_elevated, assess_compensation, delta_delta,
    expected_hco3_respiratory_acidosis, expected_hco3_respiratory_alkalosis,
    expected_pco2_metabolic_acidosis, expected_pco2_metabolic_alkalosis, pf_ratio,
};
use cdss_model::ReferenceRange;

use crate::assembler::ResultAssembler;

/// Blood-gas reference ranges. The facade echoes these into the `*_ref`
/// detail keys; the engine uses them for branch selection.
pub mod ranges {
    use super::ReferenceRange;

    pub fn ph() -> ReferenceRange {
        ReferenceRange::new(7.35, 7.45)
    }

    pub fn pco2() -> ReferenceRange {
        ReferenceRange::new(35.0, 45.0).with_unit("mmHg")
    }

    pub fn po2() -> ReferenceRange {
        ReferenceRange::new(80.0, 100.0).with_unit("mmHg")
    }

    pub fn hco3() -> ReferenceRange {
        ReferenceRange::new(22.0, 26.0).with_unit("mEq/L")
    }

    pub fn base_excess() -> ReferenceRange {
        ReferenceRange::new(-2.0, 2.0).with_unit("mEq/L")
    }

    pub fn spo2() -> ReferenceRange {
        ReferenceRange::new(95.0, 100.0).with_unit("%")
    }

    pub fn lactate() -> ReferenceRange {
        ReferenceRange::new(0.5, 2.2).with_unit("mmol/L")
    }

    pub fn anion_gap() -> ReferenceRange {
        ReferenceRange::new(
            cdss_calc::gaps::ANION_GAP_LOW,
            cdss_calc::gaps::ANION_GAP_HIGH,
        )
        .with_unit("mEq/L")
    }
}

/// Critical gates, each an independent monotone-OR contribution.
pub const PH_CRITICAL_LOW: f64 = 7.20;
pub const PH_CRITICAL_HIGH: f64 = 7.60;
pub const PO2_CRITICAL: f64 = 60.0;
pub const PO2_HYPOXEMIA: f64 = 80.0;
pub const LACTATE_CRITICAL: f64 = 4.0;
pub const PF_MILD: f64 = 300.0;
pub const PF_MODERATE: f64 = 200.0;
pub const PF_SEVERE: f64 = 100.0;

/// Normalized blood-gas inputs. Absent fields skip their sub-steps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BloodGasValues {
    pub ph: Option<f64>,
    pub pco2: Option<f64>,
    pub po2: Option<f64>,
    pub hco3: Option<f64>,
    pub base_excess: Option<f64>,
    pub fio2: Option<f64>,
    pub lactate: Option<f64>,
    pub sodium: Option<f64>,
    pub chloride: Option<f64>,
}

/// Which disturbances the pH branch assigned, one flag per axis/direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcidBaseFindings {
    pub respiratory_acidosis: bool,
    pub metabolic_acidosis: bool,
    pub respiratory_alkalosis: bool,
    pub metabolic_alkalosis: bool,
}

impl AcidBaseFindings {
    pub fn any(&self) -> bool {
        self.respiratory_acidosis
            || self.metabolic_acidosis
            || self.respiratory_alkalosis
            || self.metabolic_alkalosis
    }
}

/// Run the full diagnostic tree, appending findings to the assembler.
pub fn evaluate(values: &BloodGasValues, out: &mut ResultAssembler) -> AcidBaseFindings {
    assess_oxygenation(values, out);
    let findings = classify_acid_base(values, out);
    layer_anion_gap(values, findings, out);
    layer_lactate(values, out);
    layer_base_excess(values, out);
    findings
}

/// pH branch selection and primary/secondary disturbance assignment.
fn classify_acid_base(values: &BloodGasValues, out: &mut ResultAssembler) -> AcidBaseFindings {
    let Some(ph) = values.ph else {
        return AcidBaseFindings::default();
    };

    let ph_range = ranges::ph();
    if ph < PH_CRITICAL_LOW || ph > PH_CRITICAL_HIGH {
        out.flag_critical(true);
        out.add_abnormality("pH crítico");
        out.add_recommendation("Avaliação médica imediata - distúrbio ácido-básico grave.");
    }

    if ph_range.is_below(ph) {
        classify_acidemia(ph, values, out)
    } else if ph_range.is_above(ph) {
        classify_alkalemia(ph, values, out)
    } else {
        classify_normal_ph(ph, values, out)
    }
}

fn classify_acidemia(
    ph: f64,
    values: &BloodGasValues,
    out: &mut ResultAssembler,
) -> AcidBaseFindings {
    out.set_acid_base_status(format!("Acidemia (pH {ph:.2})."));
    out.add_abnormality("Acidemia");

    let mut findings = AcidBaseFindings::default();
    // Both primaries may be assigned at once; a mixed disorder is a real
    // clinical entity, not an inconsistency.
    if let Some(pco2) = values.pco2 {
        if ranges::pco2().is_above(pco2) {
            findings.respiratory_acidosis = true;
            out.push_line(format!(
                "Acidose Respiratória: pCO2 elevada ({pco2:.0} mmHg)."
            ));
            out.add_abnormality("Acidose Respiratória");
        }
    }
    if let Some(hco3) = values.hco3 {
        if ranges::hco3().is_below(hco3) {
            findings.metabolic_acidosis = true;
            out.push_line(format!(
                "Acidose Metabólica: HCO3- reduzido ({hco3:.1} mEq/L)."
            ));
            out.add_abnormality("Acidose Metabólica");
        }
    }

    if findings.respiratory_acidosis && findings.metabolic_acidosis {
        out.push_line("Distúrbio misto: acidose respiratória e metabólica simultâneas.");
        out.add_abnormality("Distúrbio misto");
    } else if findings.respiratory_acidosis {
        assess_metabolic_compensation(
            values,
            expected_hco3_respiratory_acidosis,
            &mut findings,
            out,
        );
    } else if findings.metabolic_acidosis {
        assess_respiratory_compensation(
            values,
            expected_pco2_metabolic_acidosis,
            &mut findings,
            out,
        );
    } else {
        out.push_line(
            "Acidemia sem distúrbio primário identificado pelos parâmetros disponíveis.",
        );
    }
    findings
}

fn classify_alkalemia(
    ph: f64,
    values: &BloodGasValues,
    out: &mut ResultAssembler,
) -> AcidBaseFindings {
    out.set_acid_base_status(format!("Alcalemia (pH {ph:.2})."));
    out.add_abnormality("Alcalemia");

    let mut findings = AcidBaseFindings::default();
    if let Some(pco2) = values.pco2 {
        if ranges::pco2().is_below(pco2) {
            findings.respiratory_alkalosis = true;
            out.push_line(format!(
                "Alcalose Respiratória: pCO2 reduzida ({pco2:.0} mmHg)."
            ));
            out.add_abnormality("Alcalose Respiratória");
        }
    }
    if let Some(hco3) = values.hco3 {
        if ranges::hco3().is_above(hco3) {
            findings.metabolic_alkalosis = true;
            out.push_line(format!(
                "Alcalose Metabólica: HCO3- elevado ({hco3:.1} mEq/L)."
            ));
            out.add_abnormality("Alcalose Metabólica");
        }
    }

    if findings.respiratory_alkalosis && findings.metabolic_alkalosis {
        out.push_line("Distúrbio misto: alcalose respiratória e metabólica simultâneas.");
        out.add_abnormality("Distúrbio misto");
    } else if findings.respiratory_alkalosis {
        assess_metabolic_compensation(
            values,
            expected_hco3_respiratory_alkalosis,
            &mut findings,
            out,
        );
    } else if findings.metabolic_alkalosis {
        assess_respiratory_compensation(
            values,
            expected_pco2_metabolic_alkalosis,
            &mut findings,
            out,
        );
    } else {
        out.push_line(
            "Alcalemia sem distúrbio primário identificado pelos parâmetros disponíveis.",
        );
    }
    findings
}

/// Normal pH still searches for compensated disorders: opposing pCO2 and
/// HCO3 deviations cancel in the pH while both remain abnormal.
fn classify_normal_ph(
    ph: f64,
    values: &BloodGasValues,
    out: &mut ResultAssembler,
) -> AcidBaseFindings {
    out.set_acid_base_status(format!("pH dentro da faixa normal ({ph:.2})."));

    let pco2_high = values.pco2.map(|v| ranges::pco2().is_above(v));
    let pco2_low = values.pco2.map(|v| ranges::pco2().is_below(v));
    let hco3_high = values.hco3.map(|v| ranges::hco3().is_above(v));
    let hco3_low = values.hco3.map(|v| ranges::hco3().is_below(v));

    let mut findings = AcidBaseFindings::default();
    match (pco2_high, hco3_high, pco2_low, hco3_low) {
        (Some(true), Some(true), _, _) => {
            findings.respiratory_acidosis = true;
            findings.metabolic_alkalosis = true;
            out.push_line(
                "pCO2 e HCO3- elevados com pH normal: acidose respiratória cronicamente \
                 compensada ou alcalose metabólica compensada.",
            );
            out.add_abnormality("Distúrbio ácido-básico compensado");
        }
        (_, _, Some(true), Some(true)) => {
            findings.respiratory_alkalosis = true;
            findings.metabolic_acidosis = true;
            out.push_line(
                "pCO2 e HCO3- reduzidos com pH normal: alcalose respiratória cronicamente \
                 compensada ou acidose metabólica compensada.",
            );
            out.add_abnormality("Distúrbio ácido-básico compensado");
        }
        _ => {
            let pco2_off = pco2_high == Some(true) || pco2_low == Some(true);
            let hco3_off = hco3_high == Some(true) || hco3_low == Some(true);
            if pco2_off || hco3_off {
                out.push_line(
                    "Alteração isolada de pCO2/HCO3- ainda sem repercussão no pH.",
                );
            } else if values.pco2.is_some() || values.hco3.is_some() {
                out.push_line("Gasometria sem distúrbio ácido-básico evidente.");
            }
        }
    }
    findings
}

/// Compensation check for a respiratory primary: compare the measured
/// HCO3 against the formula-expected value; a gap beyond the tolerance
/// band infers the metabolic disturbance that explains it.
fn assess_metabolic_compensation(
    values: &BloodGasValues,
    expected_for: fn(f64) -> f64,
    findings: &mut AcidBaseFindings,
    out: &mut ResultAssembler,
) {
    let (Some(pco2), Some(hco3)) = (values.pco2, values.hco3) else {
        return;
    };
    let expected = expected_for(pco2);
    match assess_compensation(hco3, expected) {
        CompensationStatus::Adequate => {
            out.set_compensation_status(format!(
                "Compensação metabólica adequada (HCO3- esperado ≈ {expected:.1} mEq/L)."
            ));
        }
        CompensationStatus::BelowExpected => {
            findings.metabolic_acidosis = true;
            out.push_line(format!(
                "Acidose Metabólica concomitante: HCO3- {hco3:.1} abaixo do esperado \
                 {expected:.1} mEq/L."
            ));
            out.add_abnormality("Acidose Metabólica");
            out.set_compensation_status("Compensação metabólica inadequada.");
        }
        CompensationStatus::AboveExpected => {
            findings.metabolic_alkalosis = true;
            out.push_line(format!(
                "Alcalose Metabólica concomitante: HCO3- {hco3:.1} acima do esperado \
                 {expected:.1} mEq/L."
            ));
            out.add_abnormality("Alcalose Metabólica");
            out.set_compensation_status("Compensação metabólica inadequada.");
        }
    }
}

/// Compensation check for a metabolic primary, mirroring the respiratory
/// case over pCO2.
fn assess_respiratory_compensation(
    values: &BloodGasValues,
    expected_for: fn(f64) -> f64,
    findings: &mut AcidBaseFindings,
    out: &mut ResultAssembler,
) {
    let (Some(pco2), Some(hco3)) = (values.pco2, values.hco3) else {
        return;
    };
    let expected = expected_for(hco3);
    match assess_compensation(pco2, expected) {
        CompensationStatus::Adequate => {
            out.set_compensation_status(format!(
                "Compensação respiratória adequada (pCO2 esperada ≈ {expected:.0} mmHg)."
            ));
        }
        CompensationStatus::BelowExpected => {
            findings.respiratory_alkalosis = true;
            out.push_line(format!(
                "Alcalose Respiratória concomitante: pCO2 {pco2:.0} abaixo da esperada \
                 {expected:.0} mmHg."
            ));
            out.add_abnormality("Alcalose Respiratória");
            out.set_compensation_status("Compensação respiratória inadequada.");
        }
        CompensationStatus::AboveExpected => {
            findings.respiratory_acidosis = true;
            out.push_line(format!(
                "Acidose Respiratória concomitante: pCO2 {pco2:.0} acima da esperada \
                 {expected:.0} mmHg."
            ));
            out.add_abnormality("Acidose Respiratória");
            out.set_compensation_status("Compensação respiratória inadequada.");
        }
    }
}

/// Oxygenation is classified independently of the acid-base branch.
fn assess_oxygenation(values: &BloodGasValues, out: &mut ResultAssembler) {
    if let Some(po2) = values.po2 {
        let range = ranges::po2();
        if po2 < PO2_CRITICAL {
            out.flag_critical(true);
            out.set_oxygenation_status(format!("Hipoxemia grave (pO2 {po2:.0} mmHg)."));
            out.add_abnormality("Hipoxemia grave");
            out.add_recommendation("Avaliar suporte ventilatório e oxigenoterapia.");
        } else if po2 < PO2_HYPOXEMIA {
            out.set_oxygenation_status(format!("Hipoxemia leve (pO2 {po2:.0} mmHg)."));
            out.add_abnormality("Hipoxemia");
        } else if range.is_above(po2) {
            out.set_oxygenation_status(format!("Hiperóxia (pO2 {po2:.0} mmHg)."));
            out.add_abnormality("Hiperóxia");
        }
    }

    let (Some(po2), Some(fio2)) = (values.po2, values.fio2) else {
        return;
    };
    match pf_ratio(po2, fio2) {
        Some(ratio) => {
            out.detail("P/F", ratio);
            out.detail_reference_text("P/F", "≥ 300");
            if ratio < PF_SEVERE {
                out.flag_critical(true);
                out.push_line(format!("Relação P/F {ratio:.0}: SDRA Grave."));
                out.add_abnormality("SDRA Grave");
                out.add_recommendation("Considerar estratégia ventilatória protetora.");
            } else if ratio < PF_MODERATE {
                out.flag_critical(true);
                out.push_line(format!("Relação P/F {ratio:.0}: SDRA Moderada."));
                out.add_abnormality("SDRA Moderada");
                out.add_recommendation("Considerar estratégia ventilatória protetora.");
            } else if ratio < PF_MILD {
                out.push_line(format!("Relação P/F {ratio:.0}: SDRA Leve."));
                out.add_abnormality("SDRA Leve");
            }
        }
        None => {
            out.push_line(
                "FiO2 fora da faixa fisiológica (21-100%); relação P/F não calculada.",
            );
        }
    }
}

/// Anion gap and delta-delta layering, computed only when Na, Cl and HCO3
/// are all present. An elevated gap without the classic metabolic-acidosis
/// pattern is an explicit override signal, not folded into the pH branch.
fn layer_anion_gap(
    values: &BloodGasValues,
    findings: AcidBaseFindings,
    out: &mut ResultAssembler,
) {
    let (Some(na), Some(cl), Some(hco3)) = (values.sodium, values.chloride, values.hco3) else {
        return;
    };
    let gap = anion_gap(na, cl, hco3);
    out.detail("Anion Gap", gap);
    out.detail_reference("Anion Gap", &ranges::anion_gap());

    if !anion_gap_elevated(gap) {
        return;
    }
    out.add_abnormality("Anion gap elevado");
    if findings.metabolic_acidosis {
        out.push_line(format!(
            "Acidose metabólica com anion gap aumentado ({gap:.1} mEq/L)."
        ));
    } else {
        out.push_line(format!(
            "Anion gap elevado ({gap:.1} mEq/L) sem padrão clássico de acidose metabólica: \
             considerar AGMA oculta/incipiente."
        ));
    }

    if let Some(ratio) = delta_delta(gap, hco3) {
        out.detail("Delta-Delta", ratio);
        out.detail_reference_text("Delta-Delta", "1-2");
        if ratio < 1.0 {
            out.push_line(format!(
                "Delta-delta {ratio:.1}: acidose metabólica hiperclorêmica concomitante."
            ));
        } else if ratio > 2.0 {
            out.push_line(format!(
                "Delta-delta {ratio:.1}: alcalose metabólica ou acidose respiratória crônica \
                 concomitante."
            ));
        }
    }
}

fn layer_lactate(values: &BloodGasValues, out: &mut ResultAssembler) {
    let Some(lactate) = values.lactate else {
        return;
    };
    let range = ranges::lactate();
    if lactate > LACTATE_CRITICAL {
        out.flag_critical(true);
        out.push_line(format!(
            "Hiperlactatemia grave (lactato {lactate:.1} mmol/L)."
        ));
        out.add_abnormality("Hiperlactatemia grave");
        out.add_recommendation("Investigar hipoperfusão tecidual; considerar abordagem de sepse.");
    } else if range.is_above(lactate) {
        out.push_line(format!("Hiperlactatemia (lactato {lactate:.1} mmol/L)."));
        out.add_abnormality("Hiperlactatemia");
    }
}

fn layer_base_excess(values: &BloodGasValues, out: &mut ResultAssembler) {
    let Some(base_excess) = values.base_excess else {
        return;
    };
    let range = ranges::base_excess();
    if range.is_below(base_excess) {
        out.push_line(format!(
            "Base excess reduzido ({base_excess:.1} mEq/L): componente metabólico acidótico."
        ));
    } else if range.is_above(base_excess) {
        out.push_line(format!(
            "Base excess elevado ({base_excess:.1} mEq/L): componente metabólico alcalótico."
        ));
    }
}
