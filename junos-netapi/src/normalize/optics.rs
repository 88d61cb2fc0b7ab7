//! `show interfaces diagnostics optics`.
//!
//! XML only. Readings stay as the text the device reports: no unit
//! conversion, no numeric coercion.

use serde::{Deserialize, Serialize};

use super::junos;
use super::{Payload, lenient};
use crate::error::ParseError;

/// Optics readings for one physical interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDiagnostics {
    pub name: String,
    /// Degrees Celsius, from the `junos:celsius` attribute.
    pub module_temperature: String,
    pub module_voltage: String,
    pub module_temperature_high_alarm: String,
    pub module_temperature_low_alarm: String,
    pub module_temperature_high_warn: String,
    pub module_temperature_low_warn: String,
    pub module_voltage_high_alarm: String,
    pub module_voltage_low_alarm: String,
    pub module_voltage_high_warn: String,
    pub module_voltage_low_warn: String,
    pub thresholds: OpticsThresholds,
    pub lanes: Vec<LaneDiagnostics>,
}

/// Alarm and warning thresholds of the transceiver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpticsThresholds {
    pub module_temperature_high_alarm: String,
    pub module_temperature_low_alarm: String,
    pub module_temperature_high_warn: String,
    pub module_temperature_low_warn: String,
    pub module_voltage_high_alarm: String,
    pub module_voltage_low_alarm: String,
    pub module_voltage_high_warn: String,
    pub module_voltage_low_warn: String,
    pub laser_bias_current_high_alarm: String,
    pub laser_bias_current_low_alarm: String,
    pub laser_bias_current_high_warn: String,
    pub laser_bias_current_low_warn: String,
    pub laser_tx_power_high_alarm: String,
    pub laser_tx_power_high_alarm_dbm: String,
    pub laser_tx_power_low_alarm: String,
    pub laser_tx_power_low_alarm_dbm: String,
    pub laser_tx_power_high_warn: String,
    pub laser_tx_power_high_warn_dbm: String,
    pub laser_tx_power_low_warn: String,
    pub laser_tx_power_low_warn_dbm: String,
    pub laser_rx_power_high_alarm: String,
    pub laser_rx_power_high_alarm_dbm: String,
    pub laser_rx_power_low_alarm: String,
    pub laser_rx_power_low_alarm_dbm: String,
    pub laser_rx_power_high_warn: String,
    pub laser_rx_power_high_warn_dbm: String,
    pub laser_rx_power_low_warn: String,
    pub laser_rx_power_low_warn_dbm: String,
}

/// Readings of one optical lane.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneDiagnostics {
    pub lane_index: String,
    pub laser_bias_current: String,
    pub laser_output_power: String,
    pub laser_output_power_dbm: String,
    pub laser_rx_optical_power: String,
    pub laser_rx_optical_power_dbm: String,
    pub laser_bias_current_high_alarm: String,
    pub laser_bias_current_low_alarm: String,
    pub laser_bias_current_high_warn: String,
    pub laser_bias_current_low_warn: String,
    pub laser_rx_power_high_alarm: String,
    pub laser_rx_power_low_alarm: String,
    pub laser_rx_power_high_warn: String,
    pub laser_rx_power_low_warn: String,
    pub tx_loss_of_signal_functionality_alarm: String,
    pub rx_loss_of_signal_alarm: String,
    pub tx_laser_disabled_alarm: String,
}

/// Parse optics diagnostics, one record per `physical-interface` block.
///
/// Interfaces without a transceiver keep their name and report empty readings.
pub fn parse_interface_diagnostics(raw: &str) -> Result<Vec<InterfaceDiagnostics>, ParseError> {
    let xml = match Payload::detect(raw)? {
        Payload::Xml(xml) => xml,
        _ => return Err(ParseError::UnsupportedPayload { expected: "xml" }),
    };

    let reply: XmlReply = quick_xml::de::from_str(xml)?;
    let information = reply
        .information
        .ok_or(ParseError::MissingElement("interface-information"))?;

    Ok(information
        .interfaces
        .into_iter()
        .map(InterfaceDiagnostics::from)
        .collect())
}

/// Lenient form of [`parse_interface_diagnostics`].
pub fn interface_diagnostics(raw: &str) -> Vec<InterfaceDiagnostics> {
    lenient("optics diagnostics", parse_interface_diagnostics(raw))
}

#[derive(Deserialize)]
struct XmlReply {
    #[serde(rename = "interface-information")]
    information: Option<XmlInformation>,
}

#[derive(Deserialize)]
struct XmlInformation {
    #[serde(rename = "physical-interface", default)]
    interfaces: Vec<XmlInterface>,
}

#[derive(Deserialize)]
struct XmlInterface {
    #[serde(default)]
    name: String,
    #[serde(rename = "optics-diagnostics", default)]
    optics: XmlOptics,
}

/// `<module-temperature junos:celsius="38.0">38 degrees C / 100 degrees F</module-temperature>`
#[derive(Default, Deserialize)]
struct Celsius {
    #[serde(rename = "@junos:celsius", alias = "@celsius", default)]
    celsius: String,
}

impl Celsius {
    fn value(&self) -> String {
        junos::trim(&self.celsius)
    }
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct XmlOptics {
    module_temperature: Celsius,
    module_voltage: String,
    module_temperature_high_alarm: String,
    module_temperature_low_alarm: String,
    module_temperature_high_warn: String,
    module_temperature_low_warn: String,
    module_voltage_high_alarm: String,
    module_voltage_low_alarm: String,
    module_voltage_high_warn: String,
    module_voltage_low_warn: String,

    module_temperature_high_alarm_threshold: Celsius,
    module_temperature_low_alarm_threshold: Celsius,
    module_temperature_high_warn_threshold: Celsius,
    module_temperature_low_warn_threshold: Celsius,
    module_voltage_high_alarm_threshold: String,
    module_voltage_low_alarm_threshold: String,
    module_voltage_high_warn_threshold: String,
    module_voltage_low_warn_threshold: String,
    laser_bias_current_high_alarm_threshold: String,
    laser_bias_current_low_alarm_threshold: String,
    laser_bias_current_high_warn_threshold: String,
    laser_bias_current_low_warn_threshold: String,
    laser_tx_power_high_alarm_threshold: String,
    laser_tx_power_high_alarm_threshold_dbm: String,
    laser_tx_power_low_alarm_threshold: String,
    laser_tx_power_low_alarm_threshold_dbm: String,
    laser_tx_power_high_warn_threshold: String,
    laser_tx_power_high_warn_threshold_dbm: String,
    laser_tx_power_low_warn_threshold: String,
    laser_tx_power_low_warn_threshold_dbm: String,
    laser_rx_power_high_alarm_threshold: String,
    laser_rx_power_high_alarm_threshold_dbm: String,
    laser_rx_power_low_alarm_threshold: String,
    laser_rx_power_low_alarm_threshold_dbm: String,
    laser_rx_power_high_warn_threshold: String,
    laser_rx_power_high_warn_threshold_dbm: String,
    laser_rx_power_low_warn_threshold: String,
    laser_rx_power_low_warn_threshold_dbm: String,

    #[serde(rename = "optics-diagnostics-lane-values")]
    lanes: Vec<XmlLane>,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct XmlLane {
    lane_index: String,
    laser_bias_current: String,
    laser_output_power: String,
    laser_output_power_dbm: String,
    laser_rx_optical_power: String,
    laser_rx_optical_power_dbm: String,
    laser_bias_current_high_alarm: String,
    laser_bias_current_low_alarm: String,
    laser_bias_current_high_warn: String,
    laser_bias_current_low_warn: String,
    laser_rx_power_high_alarm: String,
    laser_rx_power_low_alarm: String,
    laser_rx_power_high_warn: String,
    laser_rx_power_low_warn: String,
    tx_loss_of_signal_functionality_alarm: String,
    rx_loss_of_signal_alarm: String,
    tx_laser_disabled_alarm: String,
}

impl From<XmlInterface> for InterfaceDiagnostics {
    fn from(x: XmlInterface) -> Self {
        let o = x.optics;
        let t = junos::trim;

        Self {
            name: t(&x.name),
            module_temperature: o.module_temperature.value(),
            module_voltage: t(&o.module_voltage),
            module_temperature_high_alarm: t(&o.module_temperature_high_alarm),
            module_temperature_low_alarm: t(&o.module_temperature_low_alarm),
            module_temperature_high_warn: t(&o.module_temperature_high_warn),
            module_temperature_low_warn: t(&o.module_temperature_low_warn),
            module_voltage_high_alarm: t(&o.module_voltage_high_alarm),
            module_voltage_low_alarm: t(&o.module_voltage_low_alarm),
            module_voltage_high_warn: t(&o.module_voltage_high_warn),
            module_voltage_low_warn: t(&o.module_voltage_low_warn),
            thresholds: OpticsThresholds {
                module_temperature_high_alarm: o.module_temperature_high_alarm_threshold.value(),
                module_temperature_low_alarm: o.module_temperature_low_alarm_threshold.value(),
                module_temperature_high_warn: o.module_temperature_high_warn_threshold.value(),
                module_temperature_low_warn: o.module_temperature_low_warn_threshold.value(),
                module_voltage_high_alarm: t(&o.module_voltage_high_alarm_threshold),
                module_voltage_low_alarm: t(&o.module_voltage_low_alarm_threshold),
                module_voltage_high_warn: t(&o.module_voltage_high_warn_threshold),
                module_voltage_low_warn: t(&o.module_voltage_low_warn_threshold),
                laser_bias_current_high_alarm: t(&o.laser_bias_current_high_alarm_threshold),
                laser_bias_current_low_alarm: t(&o.laser_bias_current_low_alarm_threshold),
                laser_bias_current_high_warn: t(&o.laser_bias_current_high_warn_threshold),
                laser_bias_current_low_warn: t(&o.laser_bias_current_low_warn_threshold),
                laser_tx_power_high_alarm: t(&o.laser_tx_power_high_alarm_threshold),
                laser_tx_power_high_alarm_dbm: t(&o.laser_tx_power_high_alarm_threshold_dbm),
                laser_tx_power_low_alarm: t(&o.laser_tx_power_low_alarm_threshold),
                laser_tx_power_low_alarm_dbm: t(&o.laser_tx_power_low_alarm_threshold_dbm),
                laser_tx_power_high_warn: t(&o.laser_tx_power_high_warn_threshold),
                laser_tx_power_high_warn_dbm: t(&o.laser_tx_power_high_warn_threshold_dbm),
                laser_tx_power_low_warn: t(&o.laser_tx_power_low_warn_threshold),
                laser_tx_power_low_warn_dbm: t(&o.laser_tx_power_low_warn_threshold_dbm),
                laser_rx_power_high_alarm: t(&o.laser_rx_power_high_alarm_threshold),
                laser_rx_power_high_alarm_dbm: t(&o.laser_rx_power_high_alarm_threshold_dbm),
                laser_rx_power_low_alarm: t(&o.laser_rx_power_low_alarm_threshold),
                laser_rx_power_low_alarm_dbm: t(&o.laser_rx_power_low_alarm_threshold_dbm),
                laser_rx_power_high_warn: t(&o.laser_rx_power_high_warn_threshold),
                laser_rx_power_high_warn_dbm: t(&o.laser_rx_power_high_warn_threshold_dbm),
                laser_rx_power_low_warn: t(&o.laser_rx_power_low_warn_threshold),
                laser_rx_power_low_warn_dbm: t(&o.laser_rx_power_low_warn_threshold_dbm),
            },
            lanes: o.lanes.into_iter().map(LaneDiagnostics::from).collect(),
        }
    }
}

impl From<XmlLane> for LaneDiagnostics {
    fn from(l: XmlLane) -> Self {
        let t = junos::trim;

        Self {
            lane_index: t(&l.lane_index),
            laser_bias_current: t(&l.laser_bias_current),
            laser_output_power: t(&l.laser_output_power),
            laser_output_power_dbm: t(&l.laser_output_power_dbm),
            laser_rx_optical_power: t(&l.laser_rx_optical_power),
            laser_rx_optical_power_dbm: t(&l.laser_rx_optical_power_dbm),
            laser_bias_current_high_alarm: t(&l.laser_bias_current_high_alarm),
            laser_bias_current_low_alarm: t(&l.laser_bias_current_low_alarm),
            laser_bias_current_high_warn: t(&l.laser_bias_current_high_warn),
            laser_bias_current_low_warn: t(&l.laser_bias_current_low_warn),
            laser_rx_power_high_alarm: t(&l.laser_rx_power_high_alarm),
            laser_rx_power_low_alarm: t(&l.laser_rx_power_low_alarm),
            laser_rx_power_high_warn: t(&l.laser_rx_power_high_warn),
            laser_rx_power_low_warn: t(&l.laser_rx_power_low_warn),
            tx_loss_of_signal_functionality_alarm: t(&l.tx_loss_of_signal_functionality_alarm),
            rx_loss_of_signal_alarm: t(&l.rx_loss_of_signal_alarm),
            tx_laser_disabled_alarm: t(&l.tx_laser_disabled_alarm),
        }
    }
}
