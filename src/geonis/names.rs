//! Name catalogues of the GEONIS solutions.
//!
//! Every catalogue is a declarative table of semantic names, each with the
//! key it may be overridden by in the definition table and its default
//! (German) object name. A [`NameView`] resolves entries of one catalogue
//! against a [`DefinitionTable`].

use std::fmt;
use std::marker::PhantomData;

use super::definitions::DefinitionTable;
use super::i18n::LanguageSource;

/// One entry of a name catalogue
pub trait NameKey: Copy + fmt::Debug + 'static {
    /// Every entry of the catalogue, in declaration order
    const ALL: &'static [Self];

    /// Semantic name (e.g. `cable`)
    fn name(self) -> &'static str;

    /// Key in the definition table (e.g. `tablename_cable`)
    fn override_key(self) -> &'static str;

    /// Object name used when no override exists (e.g. `ele_kabel`)
    fn default_name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }
}

macro_rules! name_catalog {
    (
        $(#[$meta:meta])*
        $vis:vis enum $ty:ident {
            $( $variant:ident ( $name:literal, $key:literal, $default:literal ) ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $ty {
            $( $variant ),*
        }

        impl NameKey for $ty {
            const ALL: &'static [Self] = &[ $( $ty::$variant ),* ];

            fn name(self) -> &'static str {
                match self { $( $ty::$variant => $name ),* }
            }

            fn override_key(self) -> &'static str {
                match self { $( $ty::$variant => $key ),* }
            }

            fn default_name(self) -> &'static str {
                match self { $( $ty::$variant => $default ),* }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as NameKey>::from_name(s)
                    .ok_or_else(|| format!("unknown {} name '{}'", stringify!($ty), s))
            }
        }
    };
}

name_catalog! {
    /// Table names of the electric solution
    pub enum EleTable {
        Strand("strand", "tablename_branch", "ele_strang"),
        Cable("cable", "tablename_cable", "ele_kabel"),
        Clamp("clamp", "tablename_clamp", "ele_ds_klemme"),
        ConstructionLine("construction_line", "tablename_construction_line", "ele_bauobjekt_lin"),
        CsBase("cs_base", "tablename_cs_base", "ele_qs_basis"),
        CsCable("cs_cable", "tablename_cs_cable", "ele_qs_kabel"),
        CsArea("cs_area", "tablename_cs_frame", "ele_qs_fla"),
        CsPipe("cs_pipe", "tablename_cs_pipe", "ele_qs_rohr"),
        CsPipePipe("cs_pipe_pipe", "tablename_cs_pipepipe", "ele_qs_rohr_rohr"),
        CsCableProtectPos("cs_cable_protect_pos", "tablename_cs_posnum_label", "elet_qs_kabelschutzpos"),
        DsConnector("ds_connector", "tablename_ds_connector", "ele_ds_verbinder"),
        DsCableConnector("ds_cable_connector", "tablename_ds_cableconnector", "ele_ds_kabelverbindung"),
        DsTransition("ds_transition", "tablename_ds_inout", "ele_ds_uebergang"),
        DsStation("ds_station", "tablename_ds_station", "ele_ds_station"),
        DsTransformer("ds_transformer", "tablename_ds_transformer", "ele_ds_transformer"),
        House("house", "tablename_house_conn", "ele_hausanschluss"),
        Lighting("lighting", "tablename_luminary", "ele_leuchte"),
        Pipe("pipe", "tablename_pipe", "ele_rohr"),
        RelCableRoute("rel_cable_route", "tablename_route_cable", "eler_trasse_kabel"),
        RelPipeCable("rel_pipe_cable", "tablename_pipe_cable", "eler_rohr_kabel"),
        RelPipePipe("rel_pipe_pipe", "tablename_pipe_pipe", "eler_rohr_rohr"),
        RelRoutePipe("rel_route_rohr", "tablename_route_pipe", "eler_route_pipe"),
        Route("route", "tablename_route", "ele_trasse"),
        SecCableVoltage("sec_cable_voltage", "tablename_sec_cable_dense", "eles_spannung"),
        SecCableProtect("sec_cable_protect", "tablename_sec_cable_protect", "eles_kabelschutz_rohr"),
        SecCsCable("sec_cs_cable", "tablename_sec_cable_cs", "eles_querschnitt_kabel"),
        SecCsRoute("sec_cs_route", "tablename_typ_querschnitt", "eles_querschnitt_trasse"),
        SecCsScaling("sec_cs_scaling", "tablename_querschnitt_skalierung", "eles_querschnitt_skalierung"),
        SecNetColor("sec_net_color", "tablename_sec_netcolor", "eles_netzfarbe"),
        SecTypeDd("sec_type_dd", "tablename_typ_ds", "eles_typ_ds"),
        SecTypeRoute("sec_type_route", "tablename_typ_trasse", "eles_typ_trasse"),
        Sleeve("sleeve", "tablename_sleeve_socket", "ele_muffe"),
        SmallConnection("small_connection", "tablename_small_conn", "ele_kleinanschluss"),
        TCsCable("t_cs_cable", "tablename_t_cs_cable", "elet_qs_kabel"),
        TCsRohr("t_cs_rohr", "tablename_t_cs_pipe", "elet_qs_rohr"),
        TCsRohrRohr("t_cs_rohr_rohr", "tablename_t_cs_pipe_pipe", "elet_qs_rohr_rohr"),
    }
}

name_catalog! {
    /// Field names of the electric solution that resolve through the
    /// definition table. `name_number` and `description` are resolved by
    /// [`EleFieldNames`] directly.
    pub enum EleField {
        CableProtect("cable_protect", "fieldname_cable_protect", "kabelschutz"),
        CableRef("cable_ref", "fieldname_cable_ref", "kabel_ref"),
        ClampNumber("clamp_number", "fieldname_clamp_number", "nummer"),
        CodeRef("code_ref", "fieldname_code_ref", "code"),
        CsAngle("cs_angle", "fieldname_cs_angle", "symbolori"),
        CsMapscale("cs_mapscale", "fieldname_cs_mapscale", "mapscale"),
        CsRef("cs_ref", "fieldname_cs_ref", "qs_ref"),
        CsReleased("cs_released", "fieldname_cs_released", "released"),
        CsType("cs_type", "fieldname_cs_typ", "querschnitt"),
        CsVisible("cs_visible", "fieldname_cs_visible", "visible"),
        CsWidth("cs_width", "fieldname_cs_width", "breite"),
        DdRef("dd_ref", "fieldname_ds_ref", "ds_ref"),
        DdhvRef("ddhv_ref", "fieldname_dshs_ref", "dshs_ref"),
        DdlvRef("ddlv_ref", "fieldname_dsns_ref", "dsns_ref"),
        DdmvRef("ddmv_ref", "fieldname_dsms_ref", "dsms_ref"),
        DdplRef("ddpl_ref", "fieldname_dsob_ref", "dsob_ref"),
        InfoText("info_text", "fieldname_elementinfo", "infotext"),
        FeatureLink("feature_link", "fieldname_featurelink", "featurelink"),
        Index("index", "fieldname_idx", "idx"),
        IpipeRef("ipipe_ref", "fieldname_ipipe_ref", "inner_rohr_ref"),
        Length("length", "fieldname_length", "laenge"),
        OpipeRef("opipe_ref", "fieldname_opipe_ref", "ueber_rohr_ref"),
        PipeRef("pipe_ref", "fieldname_pipe_ref", "rohr_ref"),
        Position("position", "fieldname_posnum", "posnum"),
        RouteIndex("route_index", "fieldname_trench_idx", "trasse_idx"),
        RoutePos("route_pos", "fieldname_trench_pos", "trasse_pos"),
        RouteRef("route_ref", "fieldname_route_ref", "trasse_ref"),
        RouteReverse("route_reverse", "fieldname_trench_reverse", "reverse"),
        RouteType("route_type", "fieldname_trasse_typ", "typ"),
        StationRef("station_ref", "fieldname_station_ref", "station_ref"),
        StrandRef("strand_ref", "fieldname_strang_ref", "strang_ref"),
        TextOri("text_ori", "fieldname_text_angle", "textori"),
        TransformerNumber("transformer_number", "fieldname_ds_trafo_name_number", "name_nummer"),
        TransformerPower("transformer_power", "fieldname_trafo_power", "leistung"),
        TransformerRef("transformer_ref", "fieldname_trafo_ref", "trafo_ref"),
        Voltage("voltage", "fieldname_dense", "spannung"),
    }
}

/// Voltage table name for which the name/number field keeps its German name
pub const VOLTAGE_TABLE_SENTINEL: &str = "eles_spannung";

/// Read-only view resolving one catalogue against a definition table
pub struct NameView<'a, K> {
    definitions: &'a DefinitionTable,
    _catalogue: PhantomData<K>,
}

impl<K> Clone for NameView<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NameView<'_, K> {}

impl<'a, K: NameKey> NameView<'a, K> {
    pub fn new(definitions: &'a DefinitionTable) -> Self {
        NameView {
            definitions,
            _catalogue: PhantomData,
        }
    }

    pub fn get(&self, key: K) -> &'a str {
        self.definitions.get(key.override_key(), key.default_name())
    }

    /// True if the definition table renames `key`
    pub fn is_overridden(&self, key: K) -> bool {
        self.definitions.contains(key.override_key())
    }

    /// Resolves a semantic name given as text
    pub fn resolve(&self, name: &str) -> Option<&'a str> {
        K::from_name(name).map(|k| self.get(k))
    }

    /// Every entry with its resolved object name
    pub fn iter(&self) -> impl Iterator<Item = (K, &'a str)> + 'a {
        let view = *self;
        K::ALL.iter().map(move |&k| (k, view.get(k)))
    }
}

impl<K> fmt::Debug for NameView<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameView")
            .field("solution", &self.definitions.solution())
            .finish()
    }
}

pub type EleTableNames<'a> = NameView<'a, EleTable>;

/// Field names of the electric solution
#[derive(Debug, Clone, Copy)]
pub struct EleFieldNames<'a> {
    fields: NameView<'a, EleField>,
    tables: EleTableNames<'a>,
    language: &'a LanguageSource,
}

impl<'a> EleFieldNames<'a> {
    pub const NAME_NUMBER: &'static str = "name_number";
    pub const DESCRIPTION: &'static str = "description";

    pub fn new(definitions: &'a DefinitionTable, language: &'a LanguageSource) -> Self {
        EleFieldNames {
            fields: NameView::new(definitions),
            tables: NameView::new(definitions),
            language,
        }
    }

    pub fn get(&self, field: EleField) -> &'a str {
        self.fields.get(field)
    }

    pub fn is_overridden(&self, field: EleField) -> bool {
        self.fields.is_overridden(field)
    }

    /// Name/number field of the voltage table.
    ///
    /// GEONIS keeps `name_nummer` only while the voltage table has its
    /// default name; any renamed voltage table uses `name_number`.
    pub fn name_number(&self) -> &'static str {
        if self.tables.get(EleTable::SecCableVoltage) == VOLTAGE_TABLE_SENTINEL {
            "name_nummer"
        } else {
            "name_number"
        }
    }

    /// Description field for the current GEONIS language
    pub fn description(&self) -> &'static str {
        self.language.description_field()
    }

    /// Resolves any field name given as text, including `name_number` and
    /// `description`
    pub fn resolve(&self, name: &str) -> Option<&'a str> {
        match name {
            Self::NAME_NUMBER => Some(self.name_number()),
            Self::DESCRIPTION => Some(self.description()),
            _ => self.fields.resolve(name),
        }
    }

    /// Every field with its resolved name, the two derived fields last
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'a str)> + 'a {
        let derived: [(&'static str, &'a str); 2] = [
            (Self::NAME_NUMBER, self.name_number()),
            (Self::DESCRIPTION, self.description()),
        ];
        self.fields
            .iter()
            .map(|(k, v)| (k.name(), v))
            .chain(derived)
    }
}
