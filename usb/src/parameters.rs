use crate::commands::{Command, READ_FLAG};
use crate::error::{CommandError, RegistryError};
use xvf_types::AccessMode::{ReadOnly, ReadWrite, WriteOnly};
use xvf_types::ElementType::{Char, Float, Int32, Radians, Uint16, Uint32, Uint8};
use xvf_types::{AccessMode, ElementType};

/// Bumped whenever an entry of [`PARAMETERS`] is added, removed or re-addressed.
pub const TABLE_VERSION: u32 = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: &'static str,
    pub resource_id: u8,
    pub command_id: u8,
    pub count: usize,
    pub access: AccessMode,
    pub element_type: ElementType,
}

impl ParameterDescriptor {
    pub const fn new(
        name: &'static str,
        resource_id: u8,
        command_id: u8,
        count: usize,
        access: AccessMode,
        element_type: ElementType,
    ) -> Self {
        Self {
            name,
            resource_id,
            command_id,
            count,
            access,
            element_type,
        }
    }

    pub fn command(&self) -> Command {
        Command::new(self.resource_id, self.command_id)
    }

    /// Size of the encoded values, without the status byte a read response carries.
    pub fn payload_length(&self) -> usize {
        self.count * self.element_type.size()
    }

    /// Size of a read response, status byte included.
    pub fn response_length(&self) -> usize {
        1 + self.payload_length()
    }

    /// Checks the descriptor can be put on the wire at all: it carries at least one element,
    /// and its command id leaves the read bit clear.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.count == 0 {
            return Err(RegistryError::EmptyParameter(self.name));
        }
        if self.command_id & READ_FLAG != 0 {
            return Err(RegistryError::ReservedCommandBit(self.name, self.command_id));
        }
        Ok(())
    }

    pub fn check_readable(&self) -> Result<(), CommandError> {
        if !self.access.is_readable() {
            return Err(CommandError::AccessViolation {
                name: self.name,
                access: self.access,
            });
        }
        Ok(())
    }

    pub fn check_writable(&self) -> Result<(), CommandError> {
        if !self.access.is_writable() {
            return Err(CommandError::AccessViolation {
                name: self.name,
                access: self.access,
            });
        }
        Ok(())
    }
}

const fn param(
    name: &'static str,
    resource_id: u8,
    command_id: u8,
    count: usize,
    access: AccessMode,
    element_type: ElementType,
) -> ParameterDescriptor {
    ParameterDescriptor::new(name, resource_id, command_id, count, access, element_type)
}

// This table has to match the firmware exactly, the device has no way of telling us that a
// parameter is addressed or sized wrongly.
#[rustfmt::skip]
pub const PARAMETERS: &[ParameterDescriptor] = &[
    // Application servicer
    param("VERSION", 48, 0, 3, ReadOnly, Uint8),
    param("BLD_MSG", 48, 1, 50, ReadOnly, Char),
    param("BLD_HOST", 48, 2, 30, ReadOnly, Char),
    param("BLD_REPO_HASH", 48, 3, 40, ReadOnly, Char),
    param("BLD_MODIFIED", 48, 4, 6, ReadOnly, Char),
    param("BOOT_STATUS", 48, 5, 3, ReadOnly, Char),
    param("TEST_CORE_BURN", 48, 6, 1, ReadWrite, Uint8),
    param("REBOOT", 48, 7, 1, WriteOnly, Uint8),
    param("USB_BIT_DEPTH", 48, 8, 2, ReadWrite, Uint8),
    param("SAVE_CONFIGURATION", 48, 9, 1, WriteOnly, Uint8),
    param("CLEAR_CONFIGURATION", 48, 10, 1, WriteOnly, Uint8),

    // Acoustic echo canceller
    param("SHF_BYPASS", 33, 70, 1, ReadWrite, Uint8),
    param("AEC_NUM_MICS", 33, 71, 1, ReadOnly, Int32),
    param("AEC_NUM_FARENDS", 33, 72, 1, ReadOnly, Int32),
    param("AEC_MIC_ARRAY_TYPE", 33, 73, 1, ReadOnly, Int32),
    param("AEC_MIC_ARRAY_GEO", 33, 74, 12, ReadOnly, Float),
    param("AEC_AZIMUTH_VALUES", 33, 75, 4, ReadOnly, Radians),
    param("TEST_AEC_DISABLE_CONTROL", 33, 76, 1, WriteOnly, Uint32),
    param("AEC_CURRENT_IDLE_TIME", 33, 77, 1, ReadOnly, Uint32),
    param("AEC_MIN_IDLE_TIME", 33, 78, 1, ReadOnly, Uint32),
    param("AEC_RESET_MIN_IDLE_TIME", 33, 79, 1, WriteOnly, Uint32),
    param("AEC_SPENERGY_VALUES", 33, 80, 4, ReadOnly, Float),
    param("AEC_FIXEDBEAMSAZIMUTH_VALUES", 33, 81, 2, ReadWrite, Radians),
    param("AEC_FIXEDBEAMSELEVATION_VALUES", 33, 82, 2, ReadWrite, Radians),
    param("AEC_FIXEDBEAMSGATING", 33, 83, 1, ReadWrite, Uint8),
    param("SPECIAL_CMD_AEC_FAR_MIC_INDEX", 33, 90, 2, WriteOnly, Int32),
    param("SPECIAL_CMD_AEC_FILTER_COEFF_START_OFFSET", 33, 91, 1, ReadWrite, Int32),
    param("SPECIAL_CMD_AEC_FILTER_COEFFS", 33, 92, 15, ReadWrite, Float),
    param("SPECIAL_CMD_AEC_FILTER_LENGTH", 33, 93, 1, ReadOnly, Int32),
    param("AEC_FILTER_CMD_ABORT", 33, 94, 1, WriteOnly, Int32),
    param("AEC_AECPATHCHANGE", 33, 0, 1, ReadOnly, Int32),
    param("AEC_HPFONOFF", 33, 1, 1, ReadWrite, Int32),
    param("AEC_AECSILENCELEVEL", 33, 2, 2, ReadWrite, Float),
    param("AEC_AECCONVERGED", 33, 3, 1, ReadOnly, Int32),
    param("AEC_AECEMPHASISONOFF", 33, 4, 1, ReadWrite, Int32),
    param("AEC_FAR_EXTGAIN", 33, 5, 1, ReadWrite, Float),
    param("AEC_PCD_COUPLINGI", 33, 6, 1, ReadWrite, Float),
    param("AEC_PCD_MINTHR", 33, 7, 1, ReadWrite, Float),
    param("AEC_PCD_MAXTHR", 33, 8, 1, ReadWrite, Float),
    param("AEC_RT60", 33, 9, 1, ReadOnly, Float),
    param("AEC_ASROUTONOFF", 33, 35, 1, ReadWrite, Int32),
    param("AEC_ASROUTGAIN", 33, 36, 1, ReadWrite, Float),
    param("AEC_FIXEDBEAMSONOFF", 33, 37, 1, ReadWrite, Int32),
    param("AEC_FIXEDBEAMNOISETHR", 33, 38, 2, ReadWrite, Float),

    // Audio manager
    param("AUDIO_MGR_MIC_GAIN", 35, 0, 1, ReadWrite, Float),
    param("AUDIO_MGR_REF_GAIN", 35, 1, 1, ReadWrite, Float),
    param("AUDIO_MGR_CURRENT_IDLE_TIME", 35, 2, 1, ReadOnly, Int32),
    param("AUDIO_MGR_MIN_IDLE_TIME", 35, 3, 1, ReadOnly, Int32),
    param("AUDIO_MGR_RESET_MIN_IDLE_TIME", 35, 4, 1, WriteOnly, Int32),
    param("MAX_CONTROL_TIME", 35, 5, 1, ReadOnly, Int32),
    param("RESET_MAX_CONTROL_TIME", 35, 6, 1, WriteOnly, Int32),
    param("I2S_CURRENT_IDLE_TIME", 35, 7, 1, ReadOnly, Int32),
    param("I2S_MIN_IDLE_TIME", 35, 8, 1, ReadOnly, Int32),
    param("I2S_RESET_MIN_IDLE_TIME", 35, 9, 1, WriteOnly, Int32),
    param("I2S_INPUT_PACKED", 35, 10, 1, ReadWrite, Uint8),
    param("AUDIO_MGR_SELECTED_AZIMUTHS", 35, 11, 2, ReadOnly, Radians),
    param("AUDIO_MGR_SELECTED_CHANNELS", 35, 12, 2, ReadWrite, Uint8),
    param("AUDIO_MGR_OP_PACKED", 35, 13, 2, ReadWrite, Uint8),
    param("AUDIO_MGR_OP_UPSAMPLE", 35, 14, 2, ReadWrite, Uint8),
    param("AUDIO_MGR_OP_L", 35, 15, 2, ReadWrite, Uint8),
    param("AUDIO_MGR_OP_L_PK0", 35, 16, 2, ReadWrite, Uint8),
    param("AUDIO_MGR_OP_L_PK1", 35, 17, 2, ReadWrite, Uint8),
    param("AUDIO_MGR_OP_L_PK2", 35, 18, 2, ReadWrite, Uint8),
    param("AUDIO_MGR_OP_R", 35, 19, 2, ReadWrite, Uint8),
    param("AUDIO_MGR_OP_R_PK0", 35, 20, 2, ReadWrite, Uint8),
    param("AUDIO_MGR_OP_R_PK1", 35, 21, 2, ReadWrite, Uint8),
    param("AUDIO_MGR_OP_R_PK2", 35, 22, 2, ReadWrite, Uint8),
    param("AUDIO_MGR_OP_ALL", 35, 23, 12, ReadWrite, Uint8),
    param("I2S_INACTIVE", 35, 24, 1, ReadOnly, Uint8),
    param("AUDIO_MGR_FAR_END_DSP_ENABLE", 35, 25, 1, ReadWrite, Uint8),
    param("AUDIO_MGR_SYS_DELAY", 35, 26, 1, ReadWrite, Int32),
    param("I2S_DAC_DSP_ENABLE", 35, 27, 1, ReadWrite, Uint8),

    // GPO and LED ring
    param("GPO_READ_VALUES", 20, 0, 5, ReadOnly, Uint8),
    param("GPO_WRITE_VALUE", 20, 1, 2, WriteOnly, Uint8),
    param("GPO_PORT_PIN_INDEX", 20, 2, 2, ReadWrite, Uint32),
    param("GPO_PIN_VAL", 20, 3, 3, WriteOnly, Uint8),
    param("GPO_PIN_ACTIVE_LEVEL", 20, 4, 1, ReadWrite, Uint32),
    param("GPO_PIN_PWM_DUTY", 20, 5, 1, ReadWrite, Uint8),
    param("GPO_PIN_FLASH_MASK", 20, 6, 1, ReadWrite, Uint32),
    param("LED_EFFECT", 20, 12, 1, ReadWrite, Uint8),
    param("LED_BRIGHTNESS", 20, 13, 1, ReadWrite, Uint8),
    param("LED_GAMMIFY", 20, 14, 1, ReadWrite, Uint8),
    param("LED_SPEED", 20, 15, 1, ReadWrite, Uint8),
    param("LED_COLOR", 20, 16, 1, ReadWrite, Uint32),
    param("LED_DOA_COLOR", 20, 17, 2, ReadWrite, Uint32),
    param("DOA_VALUE", 20, 18, 2, ReadOnly, Uint16),
    param("LED_RING_COLOR", 20, 19, 12, ReadWrite, Uint32),

    // Post processing
    param("PP_CURRENT_IDLE_TIME", 17, 70, 1, ReadOnly, Uint32),
    param("PP_MIN_IDLE_TIME", 17, 71, 1, ReadOnly, Uint32),
    param("PP_RESET_MIN_IDLE_TIME", 17, 72, 1, WriteOnly, Uint32),
    param("SPECIAL_CMD_PP_NLMODEL_NROW_NCOL", 17, 90, 2, ReadOnly, Int32),
    param("SPECIAL_CMD_NLMODEL_START", 17, 91, 1, WriteOnly, Int32),
    param("SPECIAL_CMD_NLMODEL_COEFF_START_OFFSET", 17, 92, 1, ReadWrite, Int32),
    param("SPECIAL_CMD_PP_NLMODEL", 17, 93, 15, ReadWrite, Float),
    param("PP_NL_MODEL_CMD_ABORT", 17, 94, 1, WriteOnly, Int32),
    param("SPECIAL_CMD_PP_NLMODEL_BAND", 17, 95, 1, ReadWrite, Uint8),
    param("SPECIAL_CMD_PP_EQUALIZATION_NUM_BANDS", 17, 96, 1, ReadOnly, Int32),
    param("SPECIAL_CMD_EQUALIZATION_START", 17, 97, 1, WriteOnly, Int32),
    param("SPECIAL_CMD_EQUALIZATION_COEFF_START_OFFSET", 17, 98, 1, ReadWrite, Int32),
    param("SPECIAL_CMD_PP_EQUALIZATION", 17, 99, 15, ReadWrite, Float),
    param("PP_EQUALIZATION_CMD_ABORT", 17, 100, 1, WriteOnly, Int32),
    param("PP_AGCONOFF", 17, 10, 1, ReadWrite, Int32),
    param("PP_AGCMAXGAIN", 17, 11, 1, ReadWrite, Float),
    param("PP_AGCDESIREDLEVEL", 17, 12, 1, ReadWrite, Float),
    param("PP_AGCGAIN", 17, 13, 1, ReadWrite, Float),
    param("PP_AGCTIME", 17, 14, 1, ReadWrite, Float),
    param("PP_AGCFASTTIME", 17, 15, 1, ReadWrite, Float),
    param("PP_AGCALPHAFASTGAIN", 17, 16, 1, ReadWrite, Float),
    param("PP_AGCALPHASLOW", 17, 17, 1, ReadWrite, Float),
    param("PP_AGCALPHAFAST", 17, 18, 1, ReadWrite, Float),
    param("PP_LIMITONOFF", 17, 19, 1, ReadWrite, Int32),
    param("PP_LIMITPLIMIT", 17, 20, 1, ReadWrite, Float),
    param("PP_MIN_NS", 17, 21, 1, ReadWrite, Float),
    param("PP_MIN_NN", 17, 22, 1, ReadWrite, Float),
    param("PP_ECHOONOFF", 17, 23, 1, ReadWrite, Int32),
    param("PP_GAMMA_E", 17, 24, 1, ReadWrite, Float),
    param("PP_GAMMA_ETAIL", 17, 25, 1, ReadWrite, Float),
    param("PP_GAMMA_ENL", 17, 26, 1, ReadWrite, Float),
    param("PP_NLATTENONOFF", 17, 27, 1, ReadWrite, Int32),
    param("PP_NLAEC_MODE", 17, 28, 1, ReadWrite, Int32),
    param("PP_MGSCALE", 17, 29, 3, ReadWrite, Float),
    param("PP_FMIN_SPEINDEX", 17, 30, 1, ReadWrite, Float),
    param("PP_DTSENSITIVE", 17, 31, 1, ReadWrite, Int32),
    param("PP_ATTNS_MODE", 17, 32, 1, ReadWrite, Int32),
    param("PP_ATTNS_NOMINAL", 17, 33, 1, ReadWrite, Float),
    param("PP_ATTNS_SLOPE", 17, 34, 1, ReadWrite, Float),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn find(name: &str) -> &'static ParameterDescriptor {
        PARAMETERS.iter().find(|p| p.name == name).unwrap()
    }

    #[test]
    fn table_size() {
        assert_eq!(PARAMETERS.len(), 126);
    }

    #[test]
    fn response_lengths() {
        // uint8 and char carry one byte per element
        assert_eq!(find("VERSION").response_length(), 4);
        assert_eq!(find("BLD_MSG").response_length(), 51);
        assert_eq!(find("DOA_VALUE").response_length(), 5);
        assert_eq!(find("AEC_AZIMUTH_VALUES").response_length(), 17);
        assert_eq!(find("AEC_NUM_MICS").response_length(), 5);
        assert_eq!(find("LED_RING_COLOR").response_length(), 49);
        assert_eq!(find("SPECIAL_CMD_PP_NLMODEL").response_length(), 61);
    }

    #[test]
    fn access_checks() {
        let reboot = find("REBOOT");
        assert!(reboot.check_writable().is_ok());
        assert!(matches!(
            reboot.check_readable(),
            Err(CommandError::AccessViolation {
                name: "REBOOT",
                access: AccessMode::WriteOnly
            })
        ));

        let doa = find("DOA_VALUE");
        assert!(doa.check_readable().is_ok());
        assert!(doa.check_writable().is_err());

        let gain = find("AUDIO_MGR_MIC_GAIN");
        assert!(gain.check_readable().is_ok() && gain.check_writable().is_ok());
    }

    #[test]
    fn doa_is_addressed_on_the_gpo_servicer() {
        let doa = find("DOA_VALUE");
        assert_eq!(doa.command(), Command::new(20, 18));
        assert_eq!(doa.count, 2);
        assert_eq!(doa.element_type, Uint16);
    }
}
